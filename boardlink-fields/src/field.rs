//! The closed set of field types.

use crate::checkbox::CheckboxField;
use crate::codec::FieldCodec;
use crate::country::CountryField;
use crate::date::DateField;
use crate::dropdown::DropdownField;
use crate::email::EmailField;
use crate::error::{FieldError, FieldResult};
use crate::kind::FieldKind;
use crate::link::LinkField;
use crate::location::LocationField;
use crate::mirror::MirrorField;
use crate::number::NumberField;
use crate::people::PeopleField;
use crate::phone::PhoneField;
use crate::status::StatusField;
use crate::tags::TagsField;
use crate::text::{LongTextField, TextField};
use crate::timeline::TimelineField;
use crate::value::FieldValue;
use serde_json::Value;
use std::fmt;

macro_rules! fields {
    ($($variant:ident($ty:ident) => $kind:ident, $as_ref:ident, $as_mut:ident;)*) => {
        /// Any field, tagged by its column kind.
        ///
        /// Schemas store their declared fields as `Field`s and every record
        /// owns an independent copy of each. Two fields are equal when they
        /// are the same variant holding equal values.
        #[derive(Debug, Clone)]
        pub enum Field {
            $($variant($ty),)*
        }

        impl Field {
            /// An empty field of the given kind with default configuration.
            pub fn from_kind(kind: FieldKind) -> Self {
                match kind {
                    $(FieldKind::$kind => Field::$variant(<$ty>::default()),)*
                }
            }

            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        Field::$variant(f) => Some(f),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Field::$variant(f) => Some(f),
                        _ => None,
                    }
                }
            )*

            fn codec(&self) -> &dyn FieldCodec {
                match self {
                    $(Field::$variant(f) => f,)*
                }
            }

            fn codec_mut(&mut self) -> &mut dyn FieldCodec {
                match self {
                    $(Field::$variant(f) => f,)*
                }
            }
        }

        impl PartialEq for Field {
            fn eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Field::$variant(a), Field::$variant(b)) => a == b,)*
                    _ => false,
                }
            }
        }

        impl fmt::Display for Field {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Field::$variant(inner) => fmt::Display::fmt(inner, f),)*
                }
            }
        }

        $(
            impl From<$ty> for Field {
                fn from(field: $ty) -> Self {
                    Field::$variant(field)
                }
            }
        )*
    };
}

fields! {
    Checkbox(CheckboxField) => Checkbox, as_checkbox, as_checkbox_mut;
    Text(TextField) => Text, as_text, as_text_mut;
    LongText(LongTextField) => LongText, as_long_text, as_long_text_mut;
    Number(NumberField) => Number, as_number, as_number_mut;
    Date(DateField) => Date, as_date, as_date_mut;
    Status(StatusField) => Status, as_status, as_status_mut;
    Country(CountryField) => Country, as_country, as_country_mut;
    Email(EmailField) => Email, as_email, as_email_mut;
    Link(LinkField) => Link, as_link, as_link_mut;
    Phone(PhoneField) => Phone, as_phone, as_phone_mut;
    Timeline(TimelineField) => Timeline, as_timeline, as_timeline_mut;
    Location(LocationField) => Location, as_location, as_location_mut;
    People(PeopleField) => People, as_people, as_people_mut;
    Tags(TagsField) => Tags, as_tags, as_tags_mut;
    Dropdown(DropdownField) => Dropdown, as_dropdown, as_dropdown_mut;
    Mirror(MirrorField) => Mirror, as_mirror, as_mirror_mut;
}

impl Field {
    /// Replaces this field's value with `other`'s, keeping this field's
    /// configuration. Fails if the two fields are of different kinds.
    pub fn assign_from(&mut self, other: &Field) -> FieldResult<()> {
        if self.kind() != other.kind() {
            return Err(FieldError::TypeMismatch {
                kind: self.kind(),
                found: other.kind().as_str(),
            });
        }
        self.set_value(other.to_value())
    }
}

impl FieldCodec for Field {
    fn kind(&self) -> FieldKind {
        self.codec().kind()
    }

    fn encode(&self) -> Option<Value> {
        self.codec().encode()
    }

    fn decode(&mut self, data: Option<&Value>) -> FieldResult<()> {
        self.codec_mut().decode(data)
    }

    fn set_value(&mut self, value: FieldValue) -> FieldResult<()> {
        self.codec_mut().set_value(value)
    }

    fn to_value(&self) -> FieldValue {
        self.codec().to_value()
    }

    fn search_representation(&self) -> FieldResult<String> {
        self.codec().search_representation()
    }

    fn reads_display_text(&self) -> bool {
        self.codec().reads_display_text()
    }
}

impl From<FieldKind> for Field {
    fn from(kind: FieldKind) -> Self {
        Field::from_kind(kind)
    }
}
