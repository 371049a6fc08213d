//! Error types for schemas and records.

use boardlink_fields::FieldError;
use boardlink_types::RemoteError;
use thiserror::Error;

/// Result type for schema and record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors raised while declaring schemas or working with records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The schema declaration is invalid or does not match its board.
    #[error("invalid schema '{schema}': {message}")]
    SchemaDeclaration { schema: String, message: String },

    /// A field rejected a value or a search request.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The operation is not allowed in the record's current state.
    #[error("invalid record state: {0}")]
    State(String),

    /// The board service reported a failure.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A wire column value was not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RecordError {
    pub(crate) fn schema(schema: impl Into<String>, message: impl Into<String>) -> Self {
        RecordError::SchemaDeclaration {
            schema: schema.into(),
            message: message.into(),
        }
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        RecordError::State(message.into())
    }

    pub fn is_schema_declaration(&self) -> bool {
        matches!(self, RecordError::SchemaDeclaration { .. })
    }

    /// True for values rejected by a field's own validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, RecordError::Field(e) if e.is_validation())
    }

    pub fn is_search_unsupported(&self) -> bool {
        matches!(self, RecordError::Field(e) if e.is_search_unsupported())
    }

    pub fn is_state(&self) -> bool {
        matches!(self, RecordError::State(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, RecordError::Remote(_))
    }
}
