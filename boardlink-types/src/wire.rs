//! Wire shapes exchanged with the board store.
//!
//! These mirror the remote JSON closely. Column values travel as JSON
//! *strings* (`"{\"label\":\"Done\"}"`); field codecs only ever see the
//! parsed form.

use crate::ids::{ColumnId, GroupId, ItemId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved payload key carrying an item's display name on update.
pub const NAME_KEY: &str = "name";

/// A column definition as reported by the board schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub title: String,
    /// Remote kind tag (`"color"`, `"numeric"`, `"date"`, ...).
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
}

impl ColumnDef {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: kind.into(),
        }
    }
}

/// Reference to the group an item belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireGroup {
    pub id: GroupId,
}

/// One column value of a wire item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireColumnValue {
    pub id: ColumnId,
    /// JSON-encoded value, or `None` when the cell is empty.
    #[serde(default)]
    pub value: Option<String>,
    /// Display text rendered by the server (used by read-only mirror columns).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl WireColumnValue {
    /// Builds a column value from an already-encoded JSON value.
    pub fn encoded(id: impl Into<ColumnId>, value: &Value) -> Self {
        Self {
            id: id.into(),
            value: Some(value.to_string()),
            text: None,
        }
    }

    /// Builds an empty column value.
    pub fn empty(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            value: None,
            text: None,
        }
    }

    /// Sets the display text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Parses the raw JSON string. An absent or blank value parses to `None`.
    pub fn parsed_value(&self) -> Result<Option<Value>, serde_json::Error> {
        match self.value.as_deref() {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw).map(Some),
            _ => Ok(None),
        }
    }
}

/// An item as returned by item queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireItem {
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    pub group: WireGroup,
    #[serde(default)]
    pub column_values: Vec<WireColumnValue>,
}

impl WireItem {
    /// Returns the column value with the given id, if present.
    pub fn column(&self, id: &ColumnId) -> Option<&WireColumnValue> {
        self.column_values.iter().find(|c| &c.id == id)
    }
}

/// A create/update payload: remote column id → encoded column value, plus
/// the reserved [`NAME_KEY`] entry on updates that rename the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnValues(BTreeMap<String, Value>);

impl ColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the encoded value for a column.
    pub fn insert(&mut self, column: &ColumnId, value: Value) {
        self.0.insert(column.as_str().to_string(), value);
    }

    /// Sets the reserved display-name entry.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.0.insert(NAME_KEY.to_string(), Value::String(name.into()));
    }

    /// Returns the display-name entry, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_KEY).and_then(Value::as_str)
    }

    /// Returns the encoded value for a column.
    pub fn get(&self, column: &ColumnId) -> Option<&Value> {
        self.0.get(column.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order. The name entry, if any, is included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Column entries only, without the reserved name entry.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(k, _)| *k != NAME_KEY)
    }

    /// Serializes the payload into the JSON string form the store expects.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone().into_iter().collect()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_item_parses_store_shape() {
        let raw = json!({
            "id": "4471",
            "name": "Aviv",
            "group": {"id": "topics"},
            "column_values": [
                {"id": "status", "value": "{\"label\":\"Done\"}", "text": "Done"},
                {"id": "text0", "value": null}
            ]
        });
        let item: WireItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.id, ItemId::new(4471));
        assert_eq!(item.group.id.as_str(), "topics");
        let status = item.column(&ColumnId::from("status")).unwrap();
        assert_eq!(status.parsed_value().unwrap(), Some(json!({"label": "Done"})));
        let text = item.column(&ColumnId::from("text0")).unwrap();
        assert_eq!(text.parsed_value().unwrap(), None);
    }

    #[test]
    fn column_def_reads_type_key() {
        let col: ColumnDef =
            serde_json::from_value(json!({"id": "n1", "title": "Numbers", "type": "numeric"}))
                .unwrap();
        assert_eq!(col.kind, "numeric");
    }

    #[test]
    fn column_values_keep_name_separate() {
        let mut values = ColumnValues::new();
        values.insert(&ColumnId::from("status"), json!({"index": 2}));
        values.set_name("Renamed");
        assert_eq!(values.len(), 2);
        assert_eq!(values.name(), Some("Renamed"));
        assert_eq!(values.columns().count(), 1);
        assert_eq!(
            values.to_json_string(),
            r#"{"name":"Renamed","status":{"index":2}}"#
        );
    }
}
