//! Contract models for the settings resolver
//!
//! These models are transport-agnostic and handed to the authentication
//! decision logic once resolution completes.
//! NO serde derives - serializable views live in `api::cli::dto`.

use std::fmt;

/// Maximum length of a user identity (bytes)
pub const USER_MAX_LEN: usize = 32;
/// Maximum length of a service identity (bytes)
pub const SERVICE_MAX_LEN: usize = 32;
/// Maximum length of a device name (bytes)
pub const DEVICE_NAME_MAX_LEN: usize = 32;
/// Maximum length of device vendor, model and serial (bytes)
pub const DEVICE_PROPERTY_MAX_LEN: usize = 128;
/// Maximum length of the host name (bytes)
pub const HOSTNAME_MAX_LEN: usize = 64;
/// Maximum length of the system-side OTP directory (bytes)
pub const SYSTEM_OTP_DIRECTORY_MAX_LEN: usize = 128;
/// Maximum length of the device-side OTP directory (bytes)
pub const DEVICE_OTP_DIRECTORY_MAX_LEN: usize = 32;

/// Built-in default for `system_otp_directory`
pub const DEFAULT_SYSTEM_OTP_DIRECTORY: &str = "./";
/// Built-in default for `device_otp_directory`
pub const DEFAULT_DEVICE_OTP_DIRECTORY: &str = ".auth";
/// Built-in default for `probe_timeout` (seconds)
pub const DEFAULT_PROBE_TIMEOUT: u32 = 10;

/// A value did not fit into a bounded string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value is {len} bytes long (max: {capacity})")]
pub struct CapacityExceeded {
    /// Length of the rejected value in bytes
    pub len: usize,
    /// Capacity of the target buffer in bytes
    pub capacity: usize,
}

/// Owned string with a fixed byte capacity
///
/// Writes that would exceed the capacity are rejected and leave the current
/// value untouched. Values are never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedString {
    value: String,
    capacity: usize,
}

impl BoundedString {
    /// Create an empty string with the given capacity
    pub fn empty(capacity: usize) -> Self {
        Self {
            value: String::new(),
            capacity,
        }
    }

    /// Create a string holding `value`, rejecting it if it does not fit
    pub fn new(value: &str, capacity: usize) -> Result<Self, CapacityExceeded> {
        let mut bounded = Self::empty(capacity);
        bounded.set(value)?;
        Ok(bounded)
    }

    /// Replace the current value
    ///
    /// On error the previous value is retained.
    pub fn set(&mut self, value: &str) -> Result<(), CapacityExceeded> {
        if value.len() > self.capacity {
            return Err(CapacityExceeded {
                len: value.len(),
                capacity: self.capacity,
            });
        }
        value.clone_into(&mut self.value);
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl AsRef<str> for BoundedString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for BoundedString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for BoundedString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl fmt::Display for BoundedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Identity of the USB device bound to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Device name, the join key between user and device records
    pub name: BoundedString,
    pub vendor: BoundedString,
    pub model: BoundedString,
    pub serial: BoundedString,
}

impl DeviceIdentity {
    /// Identity with every field empty
    pub fn unbound() -> Self {
        Self {
            name: BoundedString::empty(DEVICE_NAME_MAX_LEN),
            vendor: BoundedString::empty(DEVICE_PROPERTY_MAX_LEN),
            model: BoundedString::empty(DEVICE_PROPERTY_MAX_LEN),
            serial: BoundedString::empty(DEVICE_PROPERTY_MAX_LEN),
        }
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::unbound()
    }
}

/// Fully resolved settings for one authentication attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host name, seeded from the operating system
    pub hostname: BoundedString,
    /// System-side directory holding one-time pads
    pub system_otp_directory: BoundedString,
    /// Device-side directory holding one-time pads
    pub device_otp_directory: BoundedString,
    pub debug: bool,
    /// Document option name: `enable`
    pub enabled: bool,
    pub try_otp: bool,
    pub enforce_otp: bool,
    /// Device probe timeout in seconds
    pub probe_timeout: u32,
    pub device: DeviceIdentity,
}

impl Settings {
    /// Built-in defaults with the given host name
    pub fn with_hostname(hostname: BoundedString) -> Self {
        Self {
            hostname,
            system_otp_directory: BoundedString {
                value: DEFAULT_SYSTEM_OTP_DIRECTORY.to_owned(),
                capacity: SYSTEM_OTP_DIRECTORY_MAX_LEN,
            },
            device_otp_directory: BoundedString {
                value: DEFAULT_DEVICE_OTP_DIRECTORY.to_owned(),
                capacity: DEVICE_OTP_DIRECTORY_MAX_LEN,
            },
            debug: false,
            enabled: true,
            try_otp: true,
            enforce_otp: false,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            device: DeviceIdentity::unbound(),
        }
    }
}

/// Precedence level of a scope, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeKind {
    Defaults,
    Device,
    User,
    Service,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Defaults => "defaults",
            Self::Device => "device",
            Self::User => "user",
            Self::Service => "service",
        };
        f.write_str(name)
    }
}

/// Option names recognised in every scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Hostname,
    SystemOtpDirectory,
    DeviceOtpDirectory,
    Debug,
    Enable,
    TryOtp,
    EnforceOtp,
    ProbeTimeout,
}

impl OptionName {
    /// Every option, in lookup order
    pub const ALL: [Self; 8] = [
        Self::Hostname,
        Self::SystemOtpDirectory,
        Self::DeviceOtpDirectory,
        Self::Debug,
        Self::Enable,
        Self::TryOtp,
        Self::EnforceOtp,
        Self::ProbeTimeout,
    ];

    /// Name as written in the `name` attribute of an `option` element
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::SystemOtpDirectory => "system_otp_directory",
            Self::DeviceOtpDirectory => "device_otp_directory",
            Self::Debug => "debug",
            Self::Enable => "enable",
            Self::TryOtp => "try_otp",
            Self::EnforceOtp => "enforce_otp",
            Self::ProbeTimeout => "probe_timeout",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
