//! Builder configuration.
//!
//! Defaults reproduce the permissive behavior expected by existing
//! construction sequences: later registrations win and missing script
//! images are kept without a URL. Stricter settings turn both into errors.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::images::MissingImagePolicy;

/// What to do when a character is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the earlier entry (last write wins).
    #[default]
    Overwrite,
    /// Fail with `RegistryError::Duplicate`.
    Reject,
}

/// Configuration for [`EtymologyBuilder`](crate::builder::EtymologyBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Handling of repeated registrations of one character.
    pub duplicates: DuplicatePolicy,
    /// Handling of selected script images absent from the image table.
    pub missing_images: MissingImagePolicy,
    /// NFC-normalize registry keys so composed and decomposed input agree.
    pub normalize_keys: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Overwrite,
            missing_images: MissingImagePolicy::Keep,
            normalize_keys: true,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(code(etym::config::io), help("Ensure the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(etym::config::parse),
        help(
            "Valid keys are duplicates (\"overwrite\" | \"reject\"), \
             missing_images (\"keep\" | \"reject\") and normalize_keys (bool)."
        )
    )]
    Parse { path: String, message: String },
}

impl BuilderConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = BuilderConfig::from_toml("").unwrap();
        assert_eq!(cfg, BuilderConfig::default());
        assert!(cfg.normalize_keys);
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = BuilderConfig::from_toml("duplicates = \"reject\"").unwrap();
        assert_eq!(cfg.duplicates, DuplicatePolicy::Reject);
        assert_eq!(cfg.missing_images, MissingImagePolicy::Keep);
    }

    #[test]
    fn unknown_policy_is_parse_error() {
        assert!(BuilderConfig::from_toml("missing_images = \"ignore\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("etym.toml");
        std::fs::write(&path, "missing_images = \"reject\"\nnormalize_keys = false\n").unwrap();
        let cfg = BuilderConfig::load(&path).unwrap();
        assert_eq!(cfg.missing_images, MissingImagePolicy::Reject);
        assert!(!cfg.normalize_keys);

        let missing = BuilderConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
