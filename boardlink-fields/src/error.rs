//! Error types for field codecs.

use crate::kind::FieldKind;
use thiserror::Error;

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised by field setters, decoders and search representations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A validated code (country, phone country) is not in the code table.
    #[error("invalid {kind} code '{code}', choose from ({allowed})")]
    InvalidCode {
        kind: FieldKind,
        code: String,
        allowed: String,
    },

    /// A value of the wrong shape was assigned to a field.
    #[error("a {kind} field cannot hold a {found} value")]
    TypeMismatch { kind: FieldKind, found: &'static str },

    /// The field's kind or current value has no server-side equality filter.
    #[error("cannot search {kind} fields: {reason}")]
    SearchUnsupported { kind: FieldKind, reason: String },

    /// The wire payload did not have the expected shape.
    #[error("cannot decode {kind} value: {message}")]
    Decode { kind: FieldKind, message: String },

    /// A float that has no JSON form (NaN or infinite).
    #[error("{what} must be a finite number, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// A code table could not be parsed.
    #[error("invalid code table: {0}")]
    CodeTable(#[from] serde_json::Error),
}

impl FieldError {
    pub(crate) fn search_unsupported(kind: FieldKind, reason: impl Into<String>) -> Self {
        FieldError::SearchUnsupported {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(kind: FieldKind, message: impl Into<String>) -> Self {
        FieldError::Decode {
            kind,
            message: message.into(),
        }
    }

    /// True for errors a caller can fix by supplying a different value.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FieldError::InvalidCode { .. }
                | FieldError::TypeMismatch { .. }
                | FieldError::NonFinite { .. }
        )
    }

    pub fn is_search_unsupported(&self) -> bool {
        matches!(self, FieldError::SearchUnsupported { .. })
    }
}
