use crate::codec::FieldCodec;
use crate::error::FieldResult;
use crate::json::{as_id, empty_object, present};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Whether a principal is a single user or a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Person,
    Team,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Person => "person",
            PrincipalKind::Team => "team",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "person" => Some(PrincipalKind::Person),
            "team" => Some(PrincipalKind::Team),
            _ => None,
        }
    }
}

/// A person or team assigned to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub id: u64,
    pub kind: PrincipalKind,
}

impl Principal {
    pub fn person(id: u64) -> Self {
        Self {
            id,
            kind: PrincipalKind::Person,
        }
    }

    pub fn team(id: u64) -> Self {
        Self {
            id,
            kind: PrincipalKind::Team,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.id)
    }
}

/// A people column (remote kind `multiple-person`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeopleField {
    value: Vec<Principal>,
}

impl PeopleField {
    pub fn new(principals: Vec<Principal>) -> Self {
        Self { value: principals }
    }

    pub fn value(&self) -> &[Principal] {
        &self.value
    }

    pub fn push(&mut self, principal: Principal) {
        self.value.push(principal);
    }
}

impl FieldCodec for PeopleField {
    fn kind(&self) -> FieldKind {
        FieldKind::People
    }

    fn encode(&self) -> Option<Value> {
        if self.value.is_empty() {
            return Some(empty_object());
        }
        let entries: Vec<Value> = self
            .value
            .iter()
            .map(|p| json!({"id": p.id, "kind": p.kind.as_str()}))
            .collect();
        Some(json!({ "personsAndTeams": entries }))
    }

    /// Entries of an unknown kind are skipped.
    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let entries = present(data)
            .and_then(|d| d.get("personsAndTeams"))
            .and_then(Value::as_array);
        self.value = entries
            .into_iter()
            .flatten()
            .filter_map(|entry| {
                let id = entry.get("id").and_then(as_id)?;
                let kind = entry
                    .get("kind")
                    .and_then(Value::as_str)
                    .and_then(PrincipalKind::from_tag)?;
                Some(Principal { id, kind })
            })
            .collect();
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::People(people) => self.value = people,
            FieldValue::Null => self.value.clear(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::People(self.value.clone())
    }
}

impl fmt::Display for PeopleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .value
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{joined}]")
    }
}
