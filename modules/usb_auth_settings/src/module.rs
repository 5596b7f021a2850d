//! Module declaration - wires the resolver's collaborators together

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::{ConfigError, OptionsApi, Resolution, Settings};
use crate::domain::{DocumentLoader, HostnameSource, Service, SystemHostname};
use crate::infra::xml::XmlDocumentLoader;
use std::sync::Arc;

/// USB authentication settings module
///
/// Owns the domain service and hands out native clients for it.
pub struct UsbAuthSettingsModule {
    service: Arc<Service>,
}

impl Default for UsbAuthSettingsModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl UsbAuthSettingsModule {
    /// Build the module over the local filesystem and the system host name
    pub fn new(config: Config) -> Self {
        Self::with_parts(
            config,
            Arc::new(XmlDocumentLoader::new()),
            Arc::new(SystemHostname),
        )
    }

    /// Build the module from explicit collaborators
    pub fn with_parts(
        config: Config,
        loader: Arc<dyn DocumentLoader>,
        hostname: Arc<dyn HostnameSource>,
    ) -> Self {
        tracing::info!(
            config_file = %config.config_file.display(),
            strict = config.strict_field_decoding,
            "USB auth settings module initialized"
        );
        Self {
            service: Arc::new(Service::new(loader, hostname, config)),
        }
    }

    pub fn config(&self) -> &Config {
        self.service.config()
    }

    /// Native client for in-process callers
    pub fn client(&self) -> Arc<dyn OptionsApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// Assemble settings from the configured document
    pub fn assemble(&self, user: &str, service: &str) -> Result<Settings, ConfigError> {
        self.service
            .assemble(&self.config().config_file, user, service)
    }

    /// Resolve settings from the configured document
    pub fn resolve(&self, user: &str, service: &str) -> Result<Resolution, ConfigError> {
        self.service
            .resolve(&self.config().config_file, user, service)
    }
}
