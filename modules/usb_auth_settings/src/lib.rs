//! USB Authentication Settings
//!
//! Resolves the effective settings of one USB-token authentication attempt
//! from a hierarchical XML configuration document. Option values are layered
//! defaults < device < user < service, and the user's bound device record is
//! read along the way.

// Public exports
pub mod contract;
pub use contract::{
    client::OptionsApi, error::ConfigError, BoundedString, DeviceIdentity, FieldDecodeError,
    OptionName, Resolution, ScopeKind, Settings,
};

pub mod module;
pub use module::UsbAuthSettingsModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
