use crate::codec::FieldCodec;
use crate::error::FieldResult;
use crate::json::{empty_object, present};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// A checkbox column. Unchecked by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxField {
    value: bool,
}

impl CheckboxField {
    pub fn new(checked: bool) -> Self {
        Self { value: checked }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set(&mut self, checked: bool) {
        self.value = checked;
    }
}

impl FieldCodec for CheckboxField {
    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn encode(&self) -> Option<Value> {
        if self.value {
            Some(json!({"checked": "true"}))
        } else {
            Some(empty_object())
        }
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = present(data).is_some_and(|d| d.get("checked").is_some());
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Bool(checked) => self.value = checked,
            FieldValue::Null => self.value = false,
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Bool(self.value)
    }
}

impl fmt::Display for CheckboxField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
