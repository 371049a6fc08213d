use crate::codec::FieldCodec;
use crate::error::FieldResult;
use crate::json::{as_id, present};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// A tags column holding tag ids. Always encodes its list, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsField {
    value: Vec<u64>,
}

impl TagsField {
    pub fn new(tag_ids: Vec<u64>) -> Self {
        Self { value: tag_ids }
    }

    pub fn value(&self) -> &[u64] {
        &self.value
    }
}

impl FieldCodec for TagsField {
    fn kind(&self) -> FieldKind {
        FieldKind::Tags
    }

    fn encode(&self) -> Option<Value> {
        Some(json!({ "tag_ids": self.value }))
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = present(data)
            .and_then(|d| d.get("tag_ids"))
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(as_id).collect())
            .unwrap_or_default();
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Tags(ids) => self.value = ids,
            FieldValue::Null => self.value.clear(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Tags(self.value.clone())
    }
}

impl fmt::Display for TagsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}
