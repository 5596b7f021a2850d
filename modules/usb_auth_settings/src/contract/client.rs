//! Native client trait consumed by the authentication decision logic
//!
//! NO I/O beyond loading the configuration document - direct function calls.

use super::{
    error::{ConfigError, FieldDecodeError},
    model::Settings,
};
use std::path::Path;

/// Settings together with the field errors contained during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub settings: Settings,
    /// Field decode errors, in scope then option order
    pub warnings: Vec<FieldDecodeError>,
}

/// Options resolver API
pub trait OptionsApi: Send + Sync {
    /// Resolve the settings for `user` authenticating to `service`
    fn assemble(&self, path: &Path, user: &str, service: &str) -> Result<Settings, ConfigError>;

    /// Like [`OptionsApi::assemble`], also returning the contained field errors
    fn resolve(&self, path: &Path, user: &str, service: &str) -> Result<Resolution, ConfigError>;
}
