use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::present;
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::Value;
use std::fmt;

/// A read-only mirror of another board's column (remote kind `lookup`).
///
/// Mirrors decode from the column's rendered display text and are never
/// written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorField {
    value: Option<String>,
}

impl MirrorField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl FieldCodec for MirrorField {
    fn kind(&self) -> FieldKind {
        FieldKind::Mirror
    }

    fn encode(&self) -> Option<Value> {
        None
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = match present(data) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) | None => None,
            Some(other) => Some(other.to_string()),
        };
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Text(text) => self.value = Some(text),
            FieldValue::Null => self.value = None,
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        self.value.clone().into()
    }

    fn search_representation(&self) -> FieldResult<String> {
        self.value
            .clone()
            .ok_or_else(|| FieldError::search_unsupported(self.kind(), "empty value"))
    }

    fn reads_display_text(&self) -> bool {
        true
    }
}

impl fmt::Display for MirrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or("None"))
    }
}
