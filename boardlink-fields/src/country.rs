use crate::codec::FieldCodec;
use crate::codes::CountryCodes;
use crate::error::{FieldError, FieldResult};
use crate::json::{empty_object, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// A country column holding an ISO 3166-1 alpha-2 code.
///
/// Codes are validated against the field's [`CountryCodes`] table on every
/// assignment, including decode. An empty code clears the value.
#[derive(Debug, Clone)]
pub struct CountryField {
    value: Option<String>,
    codes: Arc<CountryCodes>,
}

impl Default for CountryField {
    fn default() -> Self {
        Self::with_codes(CountryCodes::iso3166())
    }
}

impl CountryField {
    /// An empty country field using the built-in code table.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty country field validating against `codes`.
    pub fn with_codes(codes: Arc<CountryCodes>) -> Self {
        Self { value: None, codes }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn codes(&self) -> &Arc<CountryCodes> {
        &self.codes
    }

    /// Sets the code, failing fast on codes missing from the table.
    pub fn set_code(&mut self, code: Option<&str>) -> FieldResult<()> {
        match code.filter(|c| !c.is_empty()) {
            None => self.value = None,
            Some(code) => {
                self.codes.validate(self.kind(), code)?;
                self.value = Some(code.to_string());
            }
        }
        Ok(())
    }
}

impl PartialEq for CountryField {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl FieldCodec for CountryField {
    fn kind(&self) -> FieldKind {
        FieldKind::Country
    }

    fn encode(&self) -> Option<Value> {
        Some(match &self.value {
            Some(code) => json!({"countryCode": code, "countryName": code}),
            None => empty_object(),
        })
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let code = present(data).and_then(|d| str_at(d, "countryCode"));
        self.set_code(code.as_deref())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Text(code) => self.set_code(Some(&code)),
            FieldValue::Null => self.set_code(None),
            other => Err(self.mismatch(&other)),
        }
    }

    fn to_value(&self) -> FieldValue {
        self.value.clone().into()
    }

    fn search_representation(&self) -> FieldResult<String> {
        self.value
            .clone()
            .ok_or_else(|| FieldError::search_unsupported(self.kind(), "empty value"))
    }
}

impl fmt::Display for CountryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or("None"))
    }
}
