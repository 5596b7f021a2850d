//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{ConfigError, OptionsApi, Resolution, Settings};
use crate::domain::Service;
use std::path::Path;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// This is the handle the authentication decision logic holds.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl OptionsApi for NativeClient {
    fn assemble(&self, path: &Path, user: &str, service: &str) -> Result<Settings, ConfigError> {
        self.service.assemble(path, user, service)
    }

    fn resolve(&self, path: &Path, user: &str, service: &str) -> Result<Resolution, ConfigError> {
        self.service.resolve(path, user, service)
    }
}
