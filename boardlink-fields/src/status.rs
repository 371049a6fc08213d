use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{as_id, present};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// A status value: either a label or the label's position on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusValue {
    Label(String),
    Index(u64),
}

impl StatusValue {
    pub fn label(label: impl Into<String>) -> Self {
        StatusValue::Label(label.into())
    }

    /// The wire key matching this value's form.
    pub fn wire_key(&self) -> &'static str {
        match self {
            StatusValue::Label(_) => "label",
            StatusValue::Index(_) => "index",
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusValue::Label(label) => write!(f, "label: {label}"),
            StatusValue::Index(index) => write!(f, "index: {index}"),
        }
    }
}

/// A status column (remote kind `color`).
///
/// Encodes whichever of `label`/`index` matches the current value. On decode
/// `label` wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusField {
    value: Option<StatusValue>,
}

impl StatusField {
    pub fn new(value: StatusValue) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<&StatusValue> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: Option<StatusValue>) {
        self.value = value;
    }
}

impl FieldCodec for StatusField {
    fn kind(&self) -> FieldKind {
        FieldKind::Status
    }

    fn encode(&self) -> Option<Value> {
        self.value.as_ref().map(|v| match v {
            StatusValue::Label(label) => json!({ "label": label }),
            StatusValue::Index(index) => json!({ "index": index }),
        })
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = present(data).and_then(|d| {
            if let Some(Value::String(label)) = d.get("label") {
                return Some(StatusValue::Label(label.clone()));
            }
            d.get("index").and_then(as_id).map(StatusValue::Index)
        });
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Status(v) => self.value = Some(v),
            FieldValue::Text(label) => self.value = Some(StatusValue::Label(label)),
            FieldValue::Number(ref n) => match n.as_u64() {
                Some(index) => self.value = Some(StatusValue::Index(index)),
                None => return Err(self.mismatch(&value)),
            },
            FieldValue::Null => self.value = None,
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        self.value.clone().into()
    }

    fn search_representation(&self) -> FieldResult<String> {
        match &self.value {
            None => Err(FieldError::search_unsupported(
                self.kind(),
                "cannot search statuses by an empty value",
            )),
            Some(StatusValue::Index(_)) => Err(FieldError::search_unsupported(
                self.kind(),
                "cannot search statuses by index, only by label",
            )),
            Some(StatusValue::Label(label)) => Ok(label.clone()),
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("None"),
        }
    }
}
