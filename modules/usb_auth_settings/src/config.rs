//! Configuration for the settings resolver

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration document consulted when the caller names none
pub const DEFAULT_CONFIG_FILE: &str = "/etc/pamusb.conf";

/// Settings resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the configuration document
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,

    /// Fail the assembly on the first malformed option instead of
    /// reporting it and keeping the previous value
    #[serde(default)]
    pub strict_field_decoding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file: default_config_file(),
            strict_field_decoding: false,
        }
    }
}

fn default_config_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Error type for loading the resolver configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read resolver config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse resolver config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Config {
    /// Parse a YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Read and parse a YAML configuration file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.config_file, PathBuf::from("/etc/pamusb.conf"));
        assert!(!config.strict_field_decoding);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml_str("strict_field_decoding: true\n").unwrap();
        assert!(config.strict_field_decoding);
        assert_eq!(config.config_file, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_full_yaml() {
        let config = Config::from_yaml_str(
            "config_file: /opt/pamusb/pamusb.conf\nstrict_field_decoding: false\n",
        )
        .unwrap();
        assert_eq!(config.config_file, PathBuf::from("/opt/pamusb/pamusb.conf"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_yaml_str("strict: true\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_yaml_file(Path::new("/nonexistent/resolver.yaml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
    }
}
