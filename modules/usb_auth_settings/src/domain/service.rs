//! Domain service - options assembly orchestration

use super::device::DeviceBinder;
use super::document::DocumentLoader;
use super::hostname::HostnameSource;
use super::path::{validate_identity, Scope};
use super::scope::ScopeResolver;
use crate::config::Config;
use crate::contract::model::{HOSTNAME_MAX_LEN, SERVICE_MAX_LEN, USER_MAX_LEN};
use crate::contract::{
    BoundedString, ConfigError, IdentityError, IdentityRole, Resolution, Settings,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

/// Domain service assembling the settings of one authentication attempt
///
/// Every call loads its own document and builds its own settings; nothing is
/// shared between calls.
pub struct Service {
    loader: Arc<dyn DocumentLoader>,
    hostname: Arc<dyn HostnameSource>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        hostname: Arc<dyn HostnameSource>,
        config: Config,
    ) -> Self {
        Self {
            loader,
            hostname,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Built-in defaults seeded with the local host name
    pub fn default_settings(&self) -> Result<Settings, ConfigError> {
        let name = self.hostname.hostname().map_err(|e| {
            error!(error = %e, "Unable to determine host name");
            ConfigError::HostnameUnavailable {
                reason: e.to_string(),
            }
        })?;
        let hostname = BoundedString::new(&name, HOSTNAME_MAX_LEN).map_err(|e| {
            ConfigError::HostnameUnavailable {
                reason: format!("host name {name:?}: {e}"),
            }
        })?;
        Ok(Settings::with_hostname(hostname))
    }

    /// Reject identities that cannot be bound into path expressions
    pub fn validate_request(user: &str, service: &str) -> Result<(), IdentityError> {
        validate_identity(IdentityRole::User, user, USER_MAX_LEN)?;
        validate_identity(IdentityRole::Service, service, SERVICE_MAX_LEN)
    }

    /// Resolve settings for `user` authenticating to `service`
    pub fn assemble(
        &self,
        path: &Path,
        user: &str,
        service: &str,
    ) -> Result<Settings, ConfigError> {
        self.resolve(path, user, service)
            .map(|resolution| resolution.settings)
    }

    /// Resolve settings and report the field errors that were contained
    ///
    /// Order: defaults, identity validation, document load, device binding,
    /// then the defaults, device, user and service scopes. The document is
    /// released before returning on every path.
    pub fn resolve(
        &self,
        path: &Path,
        user: &str,
        service: &str,
    ) -> Result<Resolution, ConfigError> {
        let mut settings = self.default_settings()?;

        Self::validate_request(user, service).map_err(|e| {
            error!(error = %e, "Rejecting request");
            ConfigError::from(e)
        })?;

        let document = self.loader.load(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Unable to parse configuration");
            ConfigError::document_unreadable(path, e)
        })?;

        settings.device = DeviceBinder::new(document.as_ref()).bind(user)?;

        let device_name = settings.device.name.clone();
        let scopes = [
            Scope::Defaults,
            Scope::Device(device_name.as_str()),
            Scope::User(user),
            Scope::Service(service),
        ];
        let warnings = ScopeResolver::new(document.as_ref()).resolve(&scopes, &mut settings)?;

        if self.config.strict_field_decoding {
            if let Some(first) = warnings.first() {
                error!(error = %first, "Strict decoding rejected configuration");
                return Err(first.clone().into());
            }
        }

        debug!(
            user,
            service,
            device = %settings.device.name,
            warnings = warnings.len(),
            "Settings resolved"
        );
        Ok(Resolution { settings, warnings })
    }
}
