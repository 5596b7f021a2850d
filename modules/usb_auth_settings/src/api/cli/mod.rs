//! Command-line presentation of resolved settings

pub mod dto;
pub mod error;
pub mod mapper;
pub mod overrides;

pub use dto::{DeviceDto, ResolutionDto, SettingsDto, WarningDto};
pub use error::{exit_code, ExitStatus};
pub use overrides::ConfigOverrides;
