// SPDX-License-Identifier: MPL-2.0
//! ImageNet class label table.

use crate::classifier::{ClassifyError, ClassifyResult};
use std::path::Path;

/// Reads a labels file with one class name per line, skipping blank lines.
pub fn load_from_file(path: &Path) -> ClassifyResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| ClassifyError::Io(e.to_string()))?;
    Ok(parse(&content))
}

fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Resolves a class index to its label, falling back to the raw index for
/// missing or short label tables.
#[must_use]
pub fn resolve(labels: &[String], index: usize) -> String {
    labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("class {index}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let labels = parse("tabby cat\n\n  golden retriever  \n");
        assert_eq!(labels, vec!["tabby cat", "golden retriever"]);
    }

    #[test]
    fn resolve_returns_label_when_present() {
        let labels = vec!["tench".to_string(), "goldfish".to_string()];
        assert_eq!(resolve(&labels, 1), "goldfish");
    }

    #[test]
    fn resolve_falls_back_to_index() {
        let labels = vec!["tench".to_string()];
        assert_eq!(resolve(&labels, 41), "class 41");
    }

    #[test]
    fn load_from_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("labels.txt");
        std::fs::write(&path, "tench\ngoldfish\n").expect("write");

        let labels = load_from_file(&path).expect("load");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], "tench");
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let result = load_from_file(Path::new("/nonexistent/labels.txt"));
        assert!(matches!(result, Err(ClassifyError::Io(_))));
    }
}
