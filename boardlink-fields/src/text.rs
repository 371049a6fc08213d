//! Plain and long text columns.

use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// A single-line text column. Encodes as a bare JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: Option<String>,
}

impl TextField {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            value: Some(default.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl FieldCodec for TextField {
    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn encode(&self) -> Option<Value> {
        self.value.clone().map(Value::String)
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = match present(data) {
            None => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(FieldError::decode(
                    self.kind(),
                    format!("expected a string, got {other}"),
                ))
            }
        };
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Text(s) => self.value = Some(s),
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
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or("None"))
    }
}

/// A multi-line text column. Encodes as `{"text": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongTextField {
    value: Option<String>,
}

impl LongTextField {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            value: Some(default.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl FieldCodec for LongTextField {
    fn kind(&self) -> FieldKind {
        FieldKind::LongText
    }

    fn encode(&self) -> Option<Value> {
        self.value.as_ref().map(|text| json!({ "text": text }))
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = present(data).and_then(|d| str_at(d, "text"));
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Text(s) => self.value = Some(s),
            FieldValue::Null => self.value = None,
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        self.value.clone().into()
    }
}

impl fmt::Display for LongTextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or("None"))
    }
}
