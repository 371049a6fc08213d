//! Remote error types.
//!
//! The board store reports failures as an `errors` list inside an otherwise
//! normal response. Those lists are turned into [`RemoteError::Reported`],
//! keeping every server message verbatim.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Result type for board service operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Substring the store uses when a request exceeded the complexity budget.
pub const RATE_LIMIT_MARKER: &str = "Complexity budget exhausted";

/// Errors surfaced by a [`BoardService`](crate::BoardService).
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The store answered with an `errors` list. Each entry is the error's
    /// `message` text when it has one, otherwise the raw error object.
    #[error("board service reported errors: {}", render_messages(.errors))]
    Reported { errors: Vec<Value> },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Builds a reported error from a raw `errors` list.
    pub fn from_errors(errors: &[Value]) -> Self {
        let errors = errors
            .iter()
            .map(|error| match error.get("message") {
                Some(message) => message.clone(),
                None => error.clone(),
            })
            .collect();
        RemoteError::Reported { errors }
    }

    /// Convenience constructor for a single reported message.
    pub fn message(message: impl Into<String>) -> Self {
        RemoteError::Reported {
            errors: vec![Value::String(message.into())],
        }
    }

    /// Server-reported messages as display strings.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RemoteError::Reported { errors } => errors.iter().map(message_text).collect(),
            RemoteError::Transport(msg) | RemoteError::Malformed(msg) => vec![msg.clone()],
        }
    }

    /// Returns true if the store rejected the request for exhausting its
    /// complexity budget.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            RemoteError::Reported { errors } => errors
                .iter()
                .any(|e| message_text(e).contains(RATE_LIMIT_MARKER)),
            _ => false,
        }
    }

    /// Returns the reset delay announced by a rate-limit message
    /// (`"... reset in 23 seconds"`), if any.
    pub fn retry_after(&self) -> Option<Duration> {
        let RemoteError::Reported { errors } = self else {
            return None;
        };
        errors
            .iter()
            .map(message_text)
            .filter(|text| text.contains(RATE_LIMIT_MARKER))
            .find_map(|text| {
                text.split_whitespace()
                    .rev()
                    .nth(1)
                    .and_then(|secs| secs.parse::<u64>().ok())
            })
            .map(Duration::from_secs)
    }
}

/// Checks a raw store response for an `errors` list.
///
/// Returns the response untouched when it carries no errors.
pub fn check_response(response: Value) -> RemoteResult<Value> {
    match response.get("errors") {
        Some(Value::Array(errors)) => Err(RemoteError::from_errors(errors)),
        Some(other) => Err(RemoteError::from_errors(std::slice::from_ref(other))),
        None => Ok(response),
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_messages(errors: &[Value]) -> String {
    errors.iter().map(message_text).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_text_is_preferred_over_raw_object() {
        let err = RemoteError::from_errors(&[
            json!({"message": "Column not found", "locations": []}),
            json!({"code": 500}),
        ]);
        assert_eq!(
            err.messages(),
            vec!["Column not found".to_string(), r#"{"code":500}"#.to_string()]
        );
    }

    #[test]
    fn display_joins_messages() {
        let err = RemoteError::message("boom");
        assert_eq!(err.to_string(), "board service reported errors: boom");
    }
}
