use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{empty_object, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Timeline {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| {
            d.map_or_else(|| "None".to_string(), |d| d.format(DATE_FORMAT).to_string())
        };
        write!(f, "{} -> {}", show(self.start), show(self.end))
    }
}

/// A timeline column (remote kind `timerange`). Only a complete range is
/// written; a half-set range encodes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineField {
    value: Timeline,
}

impl TimelineField {
    pub fn new(timeline: Timeline) -> Self {
        Self { value: timeline }
    }

    pub fn value(&self) -> &Timeline {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Timeline {
        &mut self.value
    }

    fn parse(&self, data: &Value, key: &str) -> FieldResult<Option<NaiveDate>> {
        str_at(data, key)
            .map(|s| {
                NaiveDate::parse_from_str(&s, DATE_FORMAT)
                    .map_err(|e| FieldError::decode(self.kind(), format!("bad {key} '{s}': {e}")))
            })
            .transpose()
    }
}

impl FieldCodec for TimelineField {
    fn kind(&self) -> FieldKind {
        FieldKind::Timeline
    }

    fn encode(&self) -> Option<Value> {
        Some(match (self.value.start, self.value.end) {
            (Some(start), Some(end)) => json!({
                "from": start.format(DATE_FORMAT).to_string(),
                "to": end.format(DATE_FORMAT).to_string(),
            }),
            _ => empty_object(),
        })
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.value = match present(data) {
            Some(d) => Timeline {
                start: self.parse(d, "from")?,
                end: self.parse(d, "to")?,
            },
            None => Timeline::default(),
        };
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Timeline(timeline) => self.value = timeline,
            FieldValue::Null => self.value = Timeline::default(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Timeline(self.value)
    }
}

impl fmt::Display for TimelineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
