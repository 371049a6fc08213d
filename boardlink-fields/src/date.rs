use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{empty_object, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// A date column, optionally carrying a time of day.
///
/// Encodes as `{"date": "YYYY-MM-DD", "time": "HH:MM:SS"}`; the `time` key
/// is only written when time inclusion is on (the default). Decoding accepts
/// either key alone: a missing time means midnight, a missing date means
/// 1900-01-01.
#[derive(Debug, Clone)]
pub struct DateField {
    value: Option<NaiveDateTime>,
    include_time: bool,
}

impl Default for DateField {
    fn default() -> Self {
        Self {
            value: None,
            include_time: true,
        }
    }
}

impl DateField {
    /// An empty date field that writes both date and time.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty date field that writes only the date.
    pub fn date_only() -> Self {
        Self {
            value: None,
            include_time: false,
        }
    }

    /// Sets the default value.
    pub fn with_value(mut self, value: NaiveDateTime) -> Self {
        self.value = Some(value);
        self
    }

    pub fn includes_time(&self) -> bool {
        self.include_time
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    pub fn set(&mut self, value: Option<NaiveDateTime>) {
        self.value = value;
    }

    fn parse(&self, date: Option<&str>, time: Option<&str>) -> FieldResult<NaiveDateTime> {
        let date = match date {
            Some(d) => NaiveDate::parse_from_str(d, DATE_FORMAT)
                .map_err(|e| FieldError::decode(self.kind(), format!("bad date '{d}': {e}")))?,
            None => NaiveDate::from_ymd_opt(1900, 1, 1)
                .ok_or_else(|| FieldError::decode(self.kind(), "no default date"))?,
        };
        let time = match time {
            Some(t) => NaiveTime::parse_from_str(t, TIME_FORMAT)
                .map_err(|e| FieldError::decode(self.kind(), format!("bad time '{t}': {e}")))?,
            None => NaiveTime::MIN,
        };
        Ok(date.and_time(time))
    }
}

impl PartialEq for DateField {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl FieldCodec for DateField {
    fn kind(&self) -> FieldKind {
        FieldKind::Date
    }

    fn encode(&self) -> Option<Value> {
        let Some(value) = self.value else {
            return Some(empty_object());
        };
        let mut out = Map::new();
        out.insert(
            "date".into(),
            Value::String(value.format(DATE_FORMAT).to_string()),
        );
        if self.include_time {
            out.insert(
                "time".into(),
                Value::String(value.format(TIME_FORMAT).to_string()),
            );
        }
        Some(Value::Object(out))
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let Some(data) = present(data) else {
            self.value = None;
            return Ok(());
        };
        let date = str_at(data, "date");
        let time = str_at(data, "time");
        self.value = match (date.as_deref(), time.as_deref()) {
            (None, None) => None,
            (date, time) => Some(self.parse(date, time)?),
        };
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::DateTime(dt) => self.value = Some(dt),
            FieldValue::Date(d) => self.value = Some(d.and_time(NaiveTime::MIN)),
            FieldValue::Null => self.value = None,
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        self.value.into()
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            None => f.write_str("None"),
        }
    }
}
