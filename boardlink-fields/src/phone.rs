use crate::codec::FieldCodec;
use crate::codes::CountryCodes;
use crate::error::FieldResult;
use crate::json::{empty_object, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// A phone number with its country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phone {
    pub phone: Option<String>,
    pub country_code: Option<String>,
}

impl Phone {
    pub fn new(phone: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            country_code: Some(country_code.into()),
        }
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.country_code {
            write!(f, "({code}) ")?;
        }
        f.write_str(self.phone.as_deref().unwrap_or("None"))
    }
}

/// A phone column.
///
/// The country code is validated against the field's [`CountryCodes`]
/// table. Encodes `{}` while the number itself is unset.
#[derive(Debug, Clone)]
pub struct PhoneField {
    value: Phone,
    codes: Arc<CountryCodes>,
}

impl Default for PhoneField {
    fn default() -> Self {
        Self::with_codes(CountryCodes::iso3166())
    }
}

impl PhoneField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes(codes: Arc<CountryCodes>) -> Self {
        Self {
            value: Phone::default(),
            codes,
        }
    }

    pub fn value(&self) -> &Phone {
        &self.value
    }

    pub fn set_phone(&mut self, phone: Option<String>) {
        self.value.phone = phone;
    }

    /// Sets the country code, failing fast on codes missing from the table.
    pub fn set_country_code(&mut self, code: Option<&str>) -> FieldResult<()> {
        match code.filter(|c| !c.is_empty()) {
            None => self.value.country_code = None,
            Some(code) => {
                self.codes.validate(self.kind(), code)?;
                self.value.country_code = Some(code.to_string());
            }
        }
        Ok(())
    }
}

impl PartialEq for PhoneField {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl FieldCodec for PhoneField {
    fn kind(&self) -> FieldKind {
        FieldKind::Phone
    }

    fn encode(&self) -> Option<Value> {
        Some(match &self.value.phone {
            Some(phone) => json!({
                "phone": phone,
                "countryShortName": self.value.country_code,
            }),
            None => empty_object(),
        })
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let data = present(data);
        let code = data.and_then(|d| str_at(d, "countryShortName"));
        self.set_country_code(code.as_deref())?;
        self.value.phone = data.and_then(|d| str_at(d, "phone"));
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Phone(phone) => {
                self.set_country_code(phone.country_code.as_deref())?;
                self.value.phone = phone.phone;
            }
            FieldValue::Null => self.value = Phone::default(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Phone(self.value.clone())
    }
}

impl fmt::Display for PhoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
