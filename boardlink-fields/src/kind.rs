//! Column kind tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind tag of a column, as reported by the board schema.
///
/// Each field type declares exactly one kind; schema binding rejects a field
/// whose kind differs from its column's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "boolean")]
    Checkbox,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "long-text")]
    LongText,
    #[serde(rename = "numeric")]
    Number,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "color")]
    Status,
    #[serde(rename = "country")]
    Country,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "timerange")]
    Timeline,
    #[serde(rename = "location")]
    Location,
    #[serde(rename = "multiple-person")]
    People,
    #[serde(rename = "tag")]
    Tags,
    #[serde(rename = "dropdown")]
    Dropdown,
    #[serde(rename = "lookup")]
    Mirror,
}

impl FieldKind {
    /// Every kind, in declaration order.
    pub const ALL: [FieldKind; 16] = [
        FieldKind::Checkbox,
        FieldKind::Text,
        FieldKind::LongText,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Status,
        FieldKind::Country,
        FieldKind::Email,
        FieldKind::Link,
        FieldKind::Phone,
        FieldKind::Timeline,
        FieldKind::Location,
        FieldKind::People,
        FieldKind::Tags,
        FieldKind::Dropdown,
        FieldKind::Mirror,
    ];

    /// The remote tag for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Checkbox => "boolean",
            FieldKind::Text => "text",
            FieldKind::LongText => "long-text",
            FieldKind::Number => "numeric",
            FieldKind::Date => "date",
            FieldKind::Status => "color",
            FieldKind::Country => "country",
            FieldKind::Email => "email",
            FieldKind::Link => "link",
            FieldKind::Phone => "phone",
            FieldKind::Timeline => "timerange",
            FieldKind::Location => "location",
            FieldKind::People => "multiple-person",
            FieldKind::Tags => "tag",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Mirror => "lookup",
        }
    }

    /// Looks a kind up by its remote tag, ignoring case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    /// True if `tag` names this kind (case-insensitive).
    pub fn matches_tag(&self, tag: &str) -> bool {
        tag.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
