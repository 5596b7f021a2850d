//! Serializable views of resolved settings

use serde::Serialize;

/// Bound device record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDto {
    pub name: String,
    pub vendor: String,
    pub model: String,
    pub serial: String,
}

/// Effective settings of one authentication attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDto {
    pub hostname: String,
    pub system_otp_directory: String,
    pub device_otp_directory: String,
    pub debug: bool,
    pub enable: bool,
    pub try_otp: bool,
    pub enforce_otp: bool,
    /// Seconds
    pub probe_timeout: u32,
    pub device: DeviceDto,
}

/// A malformed option that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningDto {
    pub scope: String,
    pub option: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionDto {
    pub settings: SettingsDto,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningDto>,
}
