use crate::codec::FieldCodec;
use crate::error::{FieldError, FieldResult};
use crate::json::{empty_object, present, str_at};
use crate::kind::FieldKind;
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::fmt;

/// A hyperlink with optional display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub url: Option<String>,
    pub text: Option<String>,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            text: Some(text.into()),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.text.as_deref().unwrap_or("None"),
            self.url.as_deref().unwrap_or("None")
        )
    }
}

/// A link column. Encodes as `{"url", "text"}`; `{}` while the url is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkField {
    value: Link,
}

impl LinkField {
    pub fn new(link: Link) -> Self {
        Self { value: link }
    }

    pub fn value(&self) -> &Link {
        &self.value
    }

    /// Sub-fields are plain data and can be edited in place.
    pub fn value_mut(&mut self) -> &mut Link {
        &mut self.value
    }
}

impl FieldCodec for LinkField {
    fn kind(&self) -> FieldKind {
        FieldKind::Link
    }

    fn encode(&self) -> Option<Value> {
        Some(match &self.value.url {
            Some(url) => json!({"url": url, "text": self.value.text}),
            None => empty_object(),
        })
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        let data = present(data);
        self.value.url = data.and_then(|d| str_at(d, "url"));
        self.value.text = data.and_then(|d| str_at(d, "text"));
        Ok(())
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        match value {
            FieldValue::Link(link) => self.value = link,
            FieldValue::Null => self.value = Link::default(),
            other => return Err(self.mismatch(&other)),
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Link(self.value.clone())
    }

    fn search_representation(&self) -> FieldResult<String> {
        self.value
            .text
            .clone()
            .ok_or_else(|| FieldError::search_unsupported(self.kind(), "link has no text"))
    }
}

impl fmt::Display for LinkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
