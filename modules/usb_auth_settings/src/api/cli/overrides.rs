//! Resolver configuration assembled from command-line flags

use crate::config::Config;
use anyhow::Context;
use std::path::PathBuf;

/// Flags that shape the resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// YAML resolver configuration to start from
    pub resolver_config: Option<PathBuf>,
    /// Replaces `config_file`
    pub config_file: Option<PathBuf>,
    /// Forces strict field decoding when set
    pub strict: bool,
}

impl ConfigOverrides {
    /// Load the base configuration and apply the flags on top
    pub fn load(&self) -> anyhow::Result<Config> {
        let mut config = match &self.resolver_config {
            Some(path) => Config::from_yaml_file(path)
                .with_context(|| format!("loading resolver config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(path) = &self.config_file {
            config.config_file = path.clone();
        }
        if self.strict {
            config.strict_field_decoding = true;
        }
        Ok(config)
    }
}
