// SPDX-License-Identifier: MPL-2.0
//! Application settings, loaded from and saved to a `settings.toml` file in
//! the platform config directory.

pub mod defaults;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Override for the model download URL.
    #[serde(default)]
    pub model_url: Option<String>,
    /// Override for the labels download URL.
    #[serde(default)]
    pub labels_url: Option<String>,
    /// BLAKE3 hash the downloaded model must match. Unset skips verification.
    #[serde(default)]
    pub model_checksum: Option<String>,
    /// Number of predictions to display.
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl Config {
    /// Resolved model URL, falling back to the bundled default.
    #[must_use]
    pub fn model_url(&self) -> &str {
        self.model_url.as_deref().unwrap_or(defaults::MODEL_URL)
    }

    /// Resolved labels URL, falling back to the bundled default.
    #[must_use]
    pub fn labels_url(&self) -> &str {
        self.labels_url.as_deref().unwrap_or(defaults::LABELS_URL)
    }

    /// Resolved prediction count. Zero is treated as unset.
    #[must_use]
    pub fn top_k(&self) -> usize {
        match self.top_k {
            Some(0) | None => defaults::TOP_K,
            Some(k) => k,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Writes the config on first run, so users have a file to edit. An existing
/// settings file is never overwritten.
pub fn save_if_missing(config: &Config) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path_if_missing(config, &path);
    }
    Ok(())
}

pub fn save_to_path_if_missing(config: &Config, path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    save_to_path(config, path)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let config = Config {
            model_url: Some("https://example.com/model.onnx".to_string()),
            labels_url: None,
            model_checksum: Some("abcd".to_string()),
            top_k: Some(3),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        std::fs::write(&config_path, "this is not { toml").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn save_to_path_if_missing_writes_first_run_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");

        save_to_path_if_missing(&Config::default(), &config_path).expect("save");

        assert!(config_path.exists());
        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn save_to_path_if_missing_preserves_existing_file() {
        let existing = Config {
            top_k: Some(7),
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        save_to_path(&existing, &config_path).expect("save existing");

        save_to_path_if_missing(&Config::default(), &config_path).expect("save if missing");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded, existing);
    }

    #[test]
    fn unset_fields_resolve_to_defaults() {
        let config = Config::default();
        assert_eq!(config.model_url(), defaults::MODEL_URL);
        assert_eq!(config.labels_url(), defaults::LABELS_URL);
        assert_eq!(config.top_k(), defaults::TOP_K);
    }

    #[test]
    fn zero_top_k_resolves_to_default() {
        let config = Config {
            top_k: Some(0),
            ..Config::default()
        };
        assert_eq!(config.top_k(), defaults::TOP_K);
    }
}
