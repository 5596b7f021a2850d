//! Host name source abstraction for seeding the default `hostname` option

/// Error type for host name lookups
#[derive(Debug, thiserror::Error)]
pub enum HostnameError {
    #[error("gethostname: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("host name is not valid UTF-8: {0:?}")]
    NotUtf8(std::ffi::OsString),
}

/// Trait for obtaining the local host name
///
/// This abstraction allows switching between the operating system and a
/// fixed value for testing and embedding.
pub trait HostnameSource: Send + Sync {
    /// Get the host name used as the default `hostname` option
    fn hostname(&self) -> Result<String, HostnameError>;
}

/// Host name reported by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> Result<String, HostnameError> {
        hostname::get()?
            .into_string()
            .map_err(HostnameError::NotUtf8)
    }
}

/// Fixed host name, independent of the machine
#[derive(Debug, Clone)]
pub struct FixedHostname {
    name: String,
}

impl FixedHostname {
    /// Create a source that always reports `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl HostnameSource for FixedHostname {
    fn hostname(&self) -> Result<String, HostnameError> {
        Ok(self.name.clone())
    }
}
