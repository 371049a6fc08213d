use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::present;
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{Number, Value};
use std::fmt;

/// A numeric column.
///
/// Values are kept as JSON numbers so integers and floats stay distinct
/// (`154` encodes as `"154"`, `192.4` as `"192.4"`). The store sends numbers
/// back as numeric strings; both forms decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberField {
    value: Option<Number>,
}

impl NumberField {
    pub fn new(default: impl Into<Number>) -> Self {
        Self {
            value: Some(default.into()),
        }
    }

    pub fn value(&self) -> Option<&Number> {
        self.value.as_ref()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_ref().and_then(Number::as_f64)
    }

    pub fn set(&mut self, value: Option<Number>) {
        self.value = value;
    }
}

impl FieldCodec for NumberField {
    fn kind(&self) -> FieldKind {
        FieldKind::Number
    }

    fn encode(&self) -> Option<Value> {
        self.value.as_ref().map(|n| Value::String(n.to_string()))
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = match present(data) {
            None => None,
            Some(Value::Number(n)) => Some(n.clone()),
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(serde_json::from_str(s.trim()).map_err(|e| {
                FieldError::decode(self.kind(), format!("'{s}' is not a number: {e}"))
            })?),
            Some(other) => {
                return Err(FieldError::decode(
                    self.kind(),
                    format!("expected a number, got {other}"),
                ))
            }
        };
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Number(n) => self.value = Some(n),
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
            .as_ref()
            .map(Number::to_string)
            .ok_or_else(|| FieldError::search_unsupported(self.kind(), "empty value"))
    }
}

impl fmt::Display for NumberField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("None"),
        }
    }
}
