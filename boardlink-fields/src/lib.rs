//! Typed field codecs for board columns.
//!
//! Every column kind of a board has a matching field type that knows how to
//! encode its value into the store's wire JSON and decode it back:
//! - [`FieldCodec`] — the protocol every field type implements
//! - One concrete type per column kind ([`StatusField`], [`DateField`], ...)
//! - [`Field`] — the closed set of all field types, used by schemas and records
//! - [`FieldValue`] — plain values that can be assigned to any field
//! - [`CountryCodes`] — the code table validated country fields check against
//!
//! Fields compare by value only; configuration such as a date's
//! time-inclusion or a country table never takes part in equality.

mod checkbox;
mod codec;
mod codes;
mod country;
mod date;
mod dropdown;
mod email;
mod error;
mod field;
mod json;
mod kind;
mod link;
mod location;
mod mirror;
mod number;
mod people;
mod phone;
mod status;
mod tags;
mod text;
mod timeline;
mod value;

pub use checkbox::CheckboxField;
pub use codec::FieldCodec;
pub use codes::CountryCodes;
pub use country::CountryField;
pub use date::DateField;
pub use dropdown::{DropdownField, DropdownValue};
pub use email::EmailField;
pub use error::{FieldError, FieldResult};
pub use field::Field;
pub use kind::FieldKind;
pub use link::{Link, LinkField};
pub use location::{Location, LocationField, Place};
pub use mirror::MirrorField;
pub use number::NumberField;
pub use people::{PeopleField, Principal, PrincipalKind};
pub use phone::{Phone, PhoneField};
pub use status::{StatusField, StatusValue};
pub use tags::TagsField;
pub use text::{LongTextField, TextField};
pub use timeline::{Timeline, TimelineField};
pub use value::FieldValue;
