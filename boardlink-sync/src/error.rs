//! Error types for the sync layer.

use boardlink_fields::FieldError;
use boardlink_model::RecordError;
use boardlink_types::RemoteError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while binding schemas or fetching items.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The field is not declared, or was left unbound by the binder.
    #[error("cannot search {schema} by '{field}': not a bound field")]
    UnboundField { schema: String, field: String },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl SyncError {
    pub fn is_search_unsupported(&self) -> bool {
        match self {
            SyncError::Field(e) => e.is_search_unsupported(),
            SyncError::Record(e) => e.is_search_unsupported(),
            _ => false,
        }
    }

    pub fn is_schema_declaration(&self) -> bool {
        matches!(self, SyncError::Record(e) if e.is_schema_declaration())
    }

    /// True for failures reported by the board service, wherever they
    /// surfaced.
    pub fn is_remote(&self) -> bool {
        match self {
            SyncError::Remote(_) => true,
            SyncError::Record(e) => e.is_remote(),
            _ => false,
        }
    }

    /// The underlying board service error, if any.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            SyncError::Remote(e) | SyncError::Record(RecordError::Remote(e)) => Some(e),
            _ => None,
        }
    }
}
