//! The field codec protocol.

use crate::error::{FieldError, FieldResult};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::Value;

/// Capability set shared by every field type.
///
/// `encode`/`decode` translate between the field's typed value and the
/// store's wire JSON. `decode` always receives the *parsed* column value;
/// `None` and JSON `null` both mean "empty" and reset the field to its empty
/// state.
pub trait FieldCodec {
    /// The column kind this field binds to.
    fn kind(&self) -> FieldKind;

    /// Encodes the current value. `None` means the column is omitted from
    /// create/update payloads.
    fn encode(&self) -> Option<Value>;

    /// Replaces the current value with one decoded from the wire.
    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()>;

    /// Assigns a plain value through the field's own validation.
    fn set_value(&mut self, value: FieldValue) -> FieldResult<()>;

    /// Returns a copy of the current value.
    fn to_value(&self) -> FieldValue;

    /// Text used as a server-side equality filter on this column.
    fn search_representation(&self) -> FieldResult<String> {
        Err(FieldError::search_unsupported(
            self.kind(),
            "this column kind has no equality filter",
        ))
    }

    /// True if the field decodes from the column's display text rather than
    /// its JSON value.
    fn reads_display_text(&self) -> bool {
        false
    }

    /// Builds the mismatch error for a value this field cannot hold.
    fn mismatch(&self, value: &FieldValue) -> FieldError {
        FieldError::TypeMismatch {
            kind: self.kind(),
            found: value.type_name(),
        }
    }
}
