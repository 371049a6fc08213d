//! Plain values assignable to fields.

use crate::dropdown::DropdownValue;
use crate::error::FieldError;
use crate::link::Link;
use crate::location::Location;
use crate::people::Principal;
use crate::phone::Phone;
use crate::status::StatusValue;
use crate::timeline::Timeline;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Number;

/// A plain value, as assigned through a record's field setter.
///
/// Each field type accepts the variants that make sense for it (a status
/// field takes `Text` as a label and `Number` as an index, for example) and
/// rejects the rest with [`FieldError::TypeMismatch`](crate::FieldError).
/// `Null` clears any field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Text(String),
    Number(Number),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Status(StatusValue),
    Link(Link),
    Phone(Phone),
    Timeline(Timeline),
    Location(Location),
    People(Vec<Principal>),
    Tags(Vec<u64>),
    Dropdown(DropdownValue),
}

impl FieldValue {
    /// Short name of the variant, used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Date(_) => "date",
            FieldValue::Status(_) => "status",
            FieldValue::Link(_) => "link",
            FieldValue::Phone(_) => "phone",
            FieldValue::Timeline(_) => "timeline",
            FieldValue::Location(_) => "location",
            FieldValue::People(_) => "people",
            FieldValue::Tags(_) => "tags",
            FieldValue::Dropdown(_) => "dropdown",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Number(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v.into())
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Number(v.into())
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Number(v.into())
    }
}

/// Fails for NaN and infinities, which have no JSON form.
impl TryFrom<f64> for FieldValue {
    type Error = FieldError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Number::from_f64(v)
            .map(FieldValue::Number)
            .ok_or(FieldError::NonFinite {
                what: "number",
                value: v,
            })
    }
}

impl From<Number> for FieldValue {
    fn from(v: Number) -> Self {
        FieldValue::Number(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::DateTime(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<StatusValue> for FieldValue {
    fn from(v: StatusValue) -> Self {
        FieldValue::Status(v)
    }
}

impl From<Link> for FieldValue {
    fn from(v: Link) -> Self {
        FieldValue::Link(v)
    }
}

impl From<Phone> for FieldValue {
    fn from(v: Phone) -> Self {
        FieldValue::Phone(v)
    }
}

impl From<Timeline> for FieldValue {
    fn from(v: Timeline) -> Self {
        FieldValue::Timeline(v)
    }
}

impl From<Location> for FieldValue {
    fn from(v: Location) -> Self {
        FieldValue::Location(v)
    }
}

impl From<Vec<Principal>> for FieldValue {
    fn from(v: Vec<Principal>) -> Self {
        FieldValue::People(v)
    }
}

impl From<Vec<u64>> for FieldValue {
    fn from(v: Vec<u64>) -> Self {
        FieldValue::Tags(v)
    }
}

impl From<DropdownValue> for FieldValue {
    fn from(v: DropdownValue) -> Self {
        FieldValue::Dropdown(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_keep_integer_and_float_apart() {
        assert_eq!(FieldValue::from(154), FieldValue::Number(154.into()));
        assert_ne!(
            FieldValue::from(154),
            FieldValue::try_from(154.0).unwrap()
        );
    }

    #[test]
    fn non_finite_float_is_rejected() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = FieldValue::try_from(v).unwrap_err();
            assert!(matches!(err, FieldError::NonFinite { what: "number", .. }));
        }
    }

    #[test]
    fn option_none_is_null() {
        assert!(FieldValue::from(None::<String>).is_null());
        assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".into()));
    }
}
