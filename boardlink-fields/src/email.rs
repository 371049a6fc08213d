use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{empty_object, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// An email column. The address doubles as the link text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailField {
    value: Option<String>,
}

impl EmailField {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            value: Some(address.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set(&mut self, address: Option<String>) {
        self.value = address;
    }
}

impl FieldCodec for EmailField {
    fn kind(&self) -> FieldKind {
        FieldKind::Email
    }

    fn encode(&self) -> Option<Value> {
        Some(match &self.value {
            Some(address) => json!({"email": address, "text": address}),
            None => empty_object(),
        })
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = present(data).and_then(|d| str_at(d, "email"));
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Text(address) if address.is_empty() => self.value = None,
            FieldValue::Text(address) => self.value = Some(address),
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

impl fmt::Display for EmailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or("None"))
    }
}
