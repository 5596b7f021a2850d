//! Process exit status for resolver errors

use crate::contract::ConfigError;

/// Exit statuses reported by `pusb-conf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Failure = 1,
    InvalidIdentity = 2,
    DocumentUnreadable = 3,
    NoDeviceFound = 4,
    FieldDecode = 5,
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status as u8)
    }
}

/// Map a resolver error to the process exit status
pub fn exit_code(error: &ConfigError) -> ExitStatus {
    match error {
        ConfigError::InvalidIdentity(_) => ExitStatus::InvalidIdentity,
        ConfigError::DocumentUnreadable { .. } => ExitStatus::DocumentUnreadable,
        ConfigError::NoDeviceFound { .. } => ExitStatus::NoDeviceFound,
        ConfigError::FieldDecode(_) => ExitStatus::FieldDecode,
        ConfigError::InvalidQuery(_)
        | ConfigError::AllocationFailure { .. }
        | ConfigError::HostnameUnavailable { .. } => ExitStatus::Failure,
    }
}
