//! Typed option lookup
//!
//! A lookup has three outcomes: the document supplies a value, the document
//! has no value, or the value cannot be used. Callers keep their previous
//! value in the last two cases.

use super::document::Document;
use super::path::{option_path, PathError};
use crate::contract::{BoundedString, DecodeFailure, QueryError};
use std::num::IntErrorKind;

/// Error type for typed lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Decode(#[from] DecodeFailure),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Decode a string value into a buffer of `capacity` bytes
pub fn decode_string(text: &str, capacity: usize) -> Result<BoundedString, DecodeFailure> {
    BoundedString::new(text, capacity).map_err(|e| DecodeFailure::TooLong {
        len: e.len,
        capacity: e.capacity,
    })
}

/// Decode `true` or `false`, ignoring ASCII case
pub fn decode_bool(text: &str) -> Result<bool, DecodeFailure> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(DecodeFailure::NotBoolean {
            text: text.to_owned(),
        })
    }
}

/// Decode a base-10 signed integer and narrow it to `T`
pub fn decode_int<T: TryFrom<i64>>(text: &str) -> Result<T, DecodeFailure> {
    let wide = text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => DecodeFailure::OutOfRange {
            text: text.to_owned(),
        },
        _ => DecodeFailure::NotInteger {
            text: text.to_owned(),
        },
    })?;
    T::try_from(wide).map_err(|_| DecodeFailure::OutOfRange {
        text: text.to_owned(),
    })
}

/// Typed reads against one document
#[derive(Clone, Copy)]
pub struct TypedLookup<'d> {
    document: &'d dyn Document,
}

impl<'d> TypedLookup<'d> {
    pub fn new(document: &'d dyn Document) -> Self {
        Self { document }
    }

    /// Trimmed text at `expression`, `None` when absent or empty
    pub fn fetch(&self, expression: &str) -> Result<Option<String>, LookupError> {
        let raw = match self.document.query_text(expression) {
            Ok(raw) => raw,
            Err(QueryError::Ambiguous { matches, .. }) => {
                return Err(DecodeFailure::Ambiguous { matches }.into())
            }
            Err(e) => return Err(e.into()),
        };
        Ok(raw
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty()))
    }

    /// Raw text of `option` in the scope at `scope_path`
    pub fn lookup(&self, scope_path: &str, option: &str) -> Result<Option<String>, LookupError> {
        let expression = option_path(scope_path, option)?;
        let text = self.fetch(&expression)?;
        if let Some(ref value) = text {
            tracing::debug!(path = %expression, value = %value, "option found");
        }
        Ok(text)
    }

    /// Copy the text at `expression` into `slot`
    ///
    /// Returns `Ok(false)` when the document has no value.
    pub fn get_string_at(
        &self,
        expression: &str,
        slot: &mut BoundedString,
    ) -> Result<bool, LookupError> {
        let Some(text) = self.fetch(expression)? else {
            return Ok(false);
        };
        slot.set(&text).map_err(|e| DecodeFailure::TooLong {
            len: e.len,
            capacity: e.capacity,
        })?;
        Ok(true)
    }
}
