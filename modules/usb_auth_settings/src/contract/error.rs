//! Contract error types for the settings resolver
//!
//! Structural errors abort an assembly and must be treated as "deny" by the
//! caller. Field decode errors are contained per field and per scope.

use super::model::{OptionName, ScopeKind};
use std::fmt;
use std::path::PathBuf;

/// Which identity a value stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRole {
    User,
    Service,
    Device,
    /// Option or record property name
    Property,
}

impl fmt::Display for IdentityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Service => "service",
            Self::Device => "device",
            Self::Property => "property",
        };
        f.write_str(name)
    }
}

/// Why an identity string cannot be bound into a path expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityViolation {
    #[error("identity is empty")]
    Empty,

    #[error("identity is {len} bytes long (max: {max})")]
    TooLong { len: usize, max: usize },

    #[error("identity contains forbidden character {0:?}")]
    ForbiddenCharacter(char),
}

/// Invalid user, service or device identity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {role} identity {value:?}: {violation}")]
pub struct IdentityError {
    pub role: IdentityRole,
    pub value: String,
    #[source]
    pub violation: IdentityViolation,
}

/// Failure reported by the document loader
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Syntax(String),

    #[error("unexpected document structure: {0}")]
    Schema(String),
}

/// Failure while evaluating a path expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("malformed path expression {expression:?}: {reason}")]
    Malformed { expression: String, reason: String },

    #[error("path expression {expression:?} matched {matches} records")]
    Ambiguous { expression: String, matches: usize },
}

/// Why a raw text value could not be decoded into its field type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailure {
    #[error("value is {len} bytes long (max: {capacity})")]
    TooLong { len: usize, capacity: usize },

    #[error("expected a boolean, got {text:?}")]
    NotBoolean { text: String },

    #[error("expected an integer, got {text:?}")]
    NotInteger { text: String },

    #[error("integer {text:?} is out of range")]
    OutOfRange { text: String },

    #[error("more than one record found ({matches})")]
    Ambiguous { matches: usize },
}

/// A malformed option value in one scope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("option '{option}' in {scope} scope: {failure}")]
pub struct FieldDecodeError {
    pub scope: ScopeKind,
    pub option: OptionName,
    #[source]
    pub failure: DecodeFailure,
}

/// What is wrong with a record the device binding depends on
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordProblem {
    #[error("missing")]
    Missing,

    #[error(transparent)]
    Unreadable(#[from] DecodeFailure),

    #[error("keyed by an invalid identity: {0}")]
    InvalidKey(IdentityViolation),
}

/// Failure to bind a device to a user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceBindError {
    #[error("no device bound to user {user:?}: {problem}")]
    NoDeviceBound {
        user: String,
        problem: RecordProblem,
    },

    #[error(transparent)]
    InvalidDeviceName(#[from] IdentityError),

    #[error("device {device:?} has an incomplete record: {property}: {problem}")]
    IncompleteDeviceRecord {
        device: String,
        property: &'static str,
        problem: RecordProblem,
    },
}

/// Errors returned by an assembly call
///
/// Every variant means the policy cannot be determined and authentication
/// must be denied.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidIdentity(#[from] IdentityError),

    #[error("unable to parse {path:?}: {source}")]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("no device found for user {user:?}")]
    NoDeviceFound {
        user: String,
        #[source]
        source: DeviceBindError,
    },

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error("allocation failure while {context}")]
    AllocationFailure { context: String },

    #[error("strict decoding rejected {0}")]
    FieldDecode(#[from] FieldDecodeError),

    #[error("host name unavailable: {reason}")]
    HostnameUnavailable { reason: String },
}

impl ConfigError {
    /// Creates a document unreadable error.
    pub fn document_unreadable(path: impl Into<PathBuf>, source: DocumentError) -> Self {
        Self::DocumentUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a no device found error.
    pub fn no_device_found(user: impl Into<String>, source: DeviceBindError) -> Self {
        Self::NoDeviceFound {
            user: user.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_error_display() {
        let err = IdentityError {
            role: IdentityRole::User,
            value: "a'b".to_owned(),
            violation: IdentityViolation::ForbiddenCharacter('\''),
        };
        let text = err.to_string();
        assert!(text.contains("user"));
        assert!(text.contains("forbidden character"));
    }

    #[test]
    fn test_field_decode_error_display() {
        let err = FieldDecodeError {
            scope: ScopeKind::Service,
            option: OptionName::Debug,
            failure: DecodeFailure::NotBoolean {
                text: "maybe".to_owned(),
            },
        };
        assert_eq!(
            err.to_string(),
            "option 'debug' in service scope: expected a boolean, got \"maybe\""
        );
    }

    #[test]
    fn test_no_device_found_keeps_source() {
        use std::error::Error as _;

        let err = ConfigError::no_device_found(
            "bob",
            DeviceBindError::NoDeviceBound {
                user: "bob".to_owned(),
                problem: RecordProblem::Missing,
            },
        );
        assert!(err.to_string().contains("bob"));
        assert!(err.source().is_some());
    }
}
