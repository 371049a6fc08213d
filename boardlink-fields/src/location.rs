use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{as_f64, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{Map, Value};
use std::fmt;

/// A named place (city or country) inside a location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

impl Place {
    fn decode(data: &Value) -> Option<Self> {
        data.is_object().then(|| Self {
            long_name: str_at(data, "long_name"),
            short_name: str_at(data, "short_name"),
        })
    }
}

/// A geographic location. Only `address`, `lat` and `lng` are writable; the
/// remaining parts are filled in by the store.
///
/// Coordinates compare by [`f64::total_cmp`], so a location always equals
/// its own copy.
#[derive(Debug, Clone, Default)]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<Place>,
    pub country: Option<Place>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_id: Option<String>,
    pub street: Option<String>,
    pub street_short: Option<String>,
    pub street_number: Option<String>,
    pub street_number_short: Option<String>,
    pub text: Option<String>,
}

impl Location {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: Some(address.into()),
            lat: Some(lat),
            lng: Some(lng),
            ..Self::default()
        }
    }

    fn check_finite(&self) -> FieldResult<()> {
        for (what, coord) in [("latitude", self.lat), ("longitude", self.lng)] {
            if let Some(value) = coord.filter(|v| !v.is_finite()) {
                return Err(FieldError::NonFinite { what, value });
            }
        }
        Ok(())
    }
}

fn same_coord(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b).is_eq(),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        same_coord(self.lat, other.lat)
            && same_coord(self.lng, other.lng)
            && self.address == other.address
            && self.city == other.city
            && self.country == other.country
            && self.place_id == other.place_id
            && self.street == other.street
            && self.street_short == other.street_short
            && self.street_number == other.street_number
            && self.street_number_short == other.street_number_short
            && self.text == other.text
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_deref().or(self.address.as_deref()).unwrap_or("None"))
    }
}

/// A location column. Omitted from payloads while the address is unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationField {
    value: Location,
}

impl LocationField {
    pub fn new(location: Location) -> Self {
        Self { value: location }
    }

    pub fn value(&self) -> &Location {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Location {
        &mut self.value
    }
}

impl FieldCodec for LocationField {
    fn kind(&self) -> FieldKind {
        FieldKind::Location
    }

    fn encode(&self) -> Option<Value> {
        let address = self.value.address.as_ref()?;
        let mut out = Map::new();
        out.insert("address".into(), Value::String(address.clone()));
        for (key, coord) in [("lat", self.value.lat), ("lng", self.value.lng)] {
            if let Some(n) = coord.and_then(serde_json::Number::from_f64) {
                out.insert(key.into(), Value::Number(n));
            }
        }
        Some(Value::Object(out))
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let Some(d) = present(data) else {
            self.value = Location::default();
            return Ok(());
        };
        let decoded = Location {
            address: str_at(d, "address"),
            city: d.get("city").and_then(Place::decode),
            country: d.get("country").and_then(Place::decode),
            lat: d.get("lat").and_then(as_f64),
            lng: d.get("lng").and_then(as_f64),
            place_id: str_at(d, "placeId"),
            street: str_at(d, "street"),
            street_short: str_at(d, "streetShort"),
            street_number: str_at(d, "streetNumber"),
            street_number_short: str_at(d, "streetNumberShort"),
            text: str_at(d, "text"),
        };
        decoded.check_finite()?;
        self.value = decoded;
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Location(location) => {
                location.check_finite()?;
                self.value = location;
            }
            FieldValue::Null => self.value = Location::default(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Location(self.value.clone())
    }
}

impl fmt::Display for LocationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.address.as_deref().unwrap_or("None"))
    }
}
