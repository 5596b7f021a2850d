//! Path expression construction
//!
//! Identity strings are validated before substitution: a value containing the
//! literal delimiter would otherwise change the structure of the expression.
//! The exact output size is computed up front and reserved fallibly.

use crate::contract::{
    ConfigError, IdentityError, IdentityRole, IdentityViolation, QueryError, ScopeKind,
};
use std::collections::TryReserveError;

/// Substitution slot marker in path templates
pub const SLOT: &str = "%s";

/// Delimiter of string literals in path predicates
pub const LITERAL_DELIMITER: char = '\'';

pub const DEFAULTS_SCOPE: &str = "/configuration/defaults/";
pub const DEVICE_SCOPE: &str = "/configuration/devices/device[@name='%s']/";
pub const USER_SCOPE: &str = "/configuration/users/user[@name='%s']/";
pub const SERVICE_SCOPE: &str = "/configuration/services/service[@name='%s']/";

/// Property of a device record, e.g. `vendor`
pub const DEVICE_PROPERTY: &str = "/configuration/devices/device[@name='%s']/%s";
/// Property of a user record, e.g. `device`
pub const USER_PROPERTY: &str = "/configuration/users/user[@name='%s']/%s";
/// Option element relative to a scope path
pub const OPTION_STEP: &str = "option[@name='%s']";

/// Error type for path construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("cannot substitute {role} {value:?} into {template:?}: {violation}")]
    InvalidIdentity {
        template: String,
        role: IdentityRole,
        value: String,
        #[source]
        violation: IdentityViolation,
    },

    #[error("template {template:?} has {slots} slots but {values} values were given")]
    TemplateMismatch {
        template: String,
        slots: usize,
        values: usize,
    },

    #[error("cannot reserve {len} bytes for a path expression")]
    AllocationFailure {
        len: usize,
        #[source]
        source: TryReserveError,
    },
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::AllocationFailure { len, .. } => ConfigError::AllocationFailure {
                context: format!("building a {len} byte path expression"),
            },
            PathError::InvalidIdentity {
                role,
                value,
                violation,
                ..
            } => ConfigError::InvalidIdentity(IdentityError {
                role,
                value,
                violation,
            }),
            PathError::TemplateMismatch { ref template, .. } => {
                ConfigError::InvalidQuery(QueryError::Malformed {
                    expression: template.clone(),
                    reason: err.to_string(),
                })
            }
        }
    }
}

/// Check that `value` can be placed inside a delimited literal
pub fn check_identity_syntax(value: &str) -> Result<(), IdentityViolation> {
    if value.is_empty() {
        return Err(IdentityViolation::Empty);
    }
    if let Some(c) = value
        .chars()
        .find(|&c| c == LITERAL_DELIMITER || c.is_control())
    {
        return Err(IdentityViolation::ForbiddenCharacter(c));
    }
    Ok(())
}

/// Validate an identity against its maximum length and the literal syntax
pub fn validate_identity(role: IdentityRole, value: &str, max: usize) -> Result<(), IdentityError> {
    let violation = if value.len() > max {
        IdentityViolation::TooLong {
            len: value.len(),
            max,
        }
    } else {
        match check_identity_syntax(value) {
            Ok(()) => return Ok(()),
            Err(violation) => violation,
        }
    };
    Err(IdentityError {
        role,
        value: value.to_owned(),
        violation,
    })
}

/// Concatenate `parts` into a freshly reserved string
pub fn concat(parts: &[&str]) -> Result<String, PathError> {
    let len = parts
        .iter()
        .fold(0usize, |acc, part| acc.saturating_add(part.len()));
    let mut out = reserve(len)?;
    for part in parts {
        out.push_str(part);
    }
    Ok(out)
}

fn reserve(len: usize) -> Result<String, PathError> {
    let mut out = String::new();
    out.try_reserve_exact(len)
        .map_err(|source| PathError::AllocationFailure { len, source })?;
    Ok(out)
}

/// Role of the value substituted into `slot` of `template`
fn slot_role(template: &str, slot: usize) -> IdentityRole {
    if slot > 0 {
        return IdentityRole::Property;
    }
    if template.starts_with("/configuration/devices/") {
        IdentityRole::Device
    } else if template.starts_with("/configuration/users/") {
        IdentityRole::User
    } else if template.starts_with("/configuration/services/") {
        IdentityRole::Service
    } else {
        IdentityRole::Property
    }
}

/// Builds path expressions from a template with `%s` slots
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'t> {
    template: &'t str,
}

impl<'t> PathBuilder<'t> {
    pub const fn new(template: &'t str) -> Self {
        Self { template }
    }

    /// Number of substitution slots in the template
    pub fn slots(&self) -> usize {
        self.template.matches(SLOT).count()
    }

    /// Substitute `values` into the template slots, in order
    pub fn build(&self, values: &[&str]) -> Result<String, PathError> {
        let slots = self.slots();
        if slots != values.len() {
            return Err(PathError::TemplateMismatch {
                template: self.template.to_owned(),
                slots,
                values: values.len(),
            });
        }
        for (slot, value) in values.iter().enumerate() {
            check_identity_syntax(value).map_err(|violation| PathError::InvalidIdentity {
                template: self.template.to_owned(),
                role: slot_role(self.template, slot),
                value: (*value).to_owned(),
                violation,
            })?;
        }

        let fixed = self.template.len() - slots * SLOT.len();
        let len = values
            .iter()
            .fold(fixed, |acc, value| acc.saturating_add(value.len()));
        let mut path = reserve(len)?;
        let mut pieces = self.template.split(SLOT);
        if let Some(head) = pieces.next() {
            path.push_str(head);
        }
        for (value, piece) in values.iter().zip(pieces) {
            path.push_str(value);
            path.push_str(piece);
        }
        debug_assert_eq!(path.len(), len);
        Ok(path)
    }
}

/// One precedence level, parameterised by the identity it is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    Defaults,
    Device(&'a str),
    User(&'a str),
    Service(&'a str),
}

impl Scope<'_> {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Defaults => ScopeKind::Defaults,
            Self::Device(_) => ScopeKind::Device,
            Self::User(_) => ScopeKind::User,
            Self::Service(_) => ScopeKind::Service,
        }
    }

    /// Path of the scope element, ending with `/`
    pub fn path(&self) -> Result<String, PathError> {
        match *self {
            Self::Defaults => concat(&[DEFAULTS_SCOPE]),
            Self::Device(name) => PathBuilder::new(DEVICE_SCOPE).build(&[name]),
            Self::User(name) => PathBuilder::new(USER_SCOPE).build(&[name]),
            Self::Service(name) => PathBuilder::new(SERVICE_SCOPE).build(&[name]),
        }
    }
}

/// Path of option `option` under `scope_path`
pub fn option_path(scope_path: &str, option: &str) -> Result<String, PathError> {
    let step = PathBuilder::new(OPTION_STEP).build(&[option])?;
    concat(&[scope_path, &step])
}
