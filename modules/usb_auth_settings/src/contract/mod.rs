//! Contract layer - public API consumed by the authentication decision logic
//!
//! This layer contains transport-agnostic models, errors and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::{OptionsApi, Resolution};
pub use error::{
    ConfigError, DecodeFailure, DeviceBindError, DocumentError, FieldDecodeError, IdentityError,
    IdentityRole, IdentityViolation, QueryError, RecordProblem,
};
pub use model::{
    BoundedString, CapacityExceeded, DeviceIdentity, OptionName, ScopeKind, Settings,
};
