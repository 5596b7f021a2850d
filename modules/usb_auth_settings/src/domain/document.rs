//! Document traits for configuration access
//!
//! These traits define the capability the resolver needs from the
//! hierarchical document layer. Implementations are in infra/xml.

use crate::contract::{DocumentError, QueryError};
use std::path::Path;

/// A loaded configuration document
///
/// The handle is released when dropped.
pub trait Document {
    /// Text of the single element matched by `expression`
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// [`QueryError::Ambiguous`] when more than one element matches.
    fn query_text(&self, expression: &str) -> Result<Option<String>, QueryError>;
}

/// Loads configuration documents from a backing store
pub trait DocumentLoader: Send + Sync {
    /// Load and parse the document at `path`
    fn load(&self, path: &Path) -> Result<Box<dyn Document>, DocumentError>;
}
