use crate::codec::FieldCodec;
use crate::error::FieldResult;
use crate::json::{as_id, present};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// A dropdown selection, expressed either by option labels or by option ids.
///
/// Values written by callers are usually labels; values read back from the
/// store are always ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownValue {
    Labels(Vec<String>),
    Ids(Vec<u64>),
}

impl Default for DropdownValue {
    fn default() -> Self {
        DropdownValue::Labels(Vec::new())
    }
}

impl DropdownValue {
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DropdownValue::Labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DropdownValue::Labels(labels) => labels.is_empty(),
            DropdownValue::Ids(ids) => ids.is_empty(),
        }
    }
}

impl fmt::Display for DropdownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropdownValue::Labels(labels) => write!(f, "labels: {labels:?}"),
            DropdownValue::Ids(ids) => write!(f, "ids: {ids:?}"),
        }
    }
}

/// A dropdown column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownField {
    value: DropdownValue,
}

impl DropdownField {
    pub fn new(value: DropdownValue) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &DropdownValue {
        &self.value
    }
}

impl FieldCodec for DropdownField {
    fn kind(&self) -> FieldKind {
        FieldKind::Dropdown
    }

    fn encode(&self) -> Option<Value> {
        match &self.value {
            DropdownValue::Labels(labels) if labels.is_empty() => None,
            DropdownValue::Labels(labels) => Some(json!({ "labels": labels })),
            DropdownValue::Ids(ids) => Some(json!({ "ids": ids })),
        }
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let data = present(data);
        let ids = data.and_then(|d| d.get("ids")).and_then(Value::as_array);
        let labels = data.and_then(|d| d.get("labels")).and_then(Value::as_array);
        self.value = match (ids, labels) {
            (Some(ids), _) => DropdownValue::Ids(ids.iter().filter_map(as_id).collect()),
            (None, Some(labels)) => DropdownValue::Labels(
                labels
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            (None, None) => DropdownValue::default(),
        };
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Dropdown(v) => self.value = v,
            FieldValue::Tags(ids) => self.value = DropdownValue::Ids(ids),
            FieldValue::Text(label) => self.value = DropdownValue::Labels(vec![label]),
            FieldValue::Null => self.value = DropdownValue::default(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Dropdown(self.value.clone())
    }
}

impl fmt::Display for DropdownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
