// SPDX-License-Identifier: MPL-2.0
//! Image source references: a local file or a remote URL.

use std::fmt;
use std::path::PathBuf;

/// Reference to the image the user selected. Exactly one source is "current"
/// at a time; previous sources live on in the history strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file chosen through the file picker (or the CLI).
    Path(PathBuf),
    /// Remote image pasted into the URL field.
    Url(String),
}

impl ImageSource {
    /// Short label shown under history thumbnails and in tooltips.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            ImageSource::Path(path) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
            ImageSource::Url(url) => {
                // Last path segment reads better than the full URL.
                let trimmed = url.trim_end_matches('/');
                trimmed
                    .rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(trimmed)
                    .to_string()
            }
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_for_path_uses_file_name() {
        let source = ImageSource::Path(PathBuf::from("/photos/cat.jpg"));
        assert_eq!(source.display_name(), "cat.jpg");
    }

    #[test]
    fn display_name_for_url_uses_last_segment() {
        let source = ImageSource::Url("https://example.com/images/dog.png".into());
        assert_eq!(source.display_name(), "dog.png");
    }

    #[test]
    fn display_name_for_bare_host_falls_back_to_url() {
        let source = ImageSource::Url("https://example.com".into());
        assert_eq!(source.display_name(), "example.com");
    }

    #[test]
    fn sources_compare_by_value() {
        let a = ImageSource::Url("https://example.com/a.png".into());
        let b = ImageSource::Url("https://example.com/a.png".into());
        assert_eq!(a, b);
    }
}
