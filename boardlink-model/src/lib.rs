//! Record schemas and change-tracked records.
//!
//! - [`RecordSchema`] — a declared record type: named fields, required
//!   constructor arguments and per-field update hooks
//! - [`bind_columns`] — checks a schema against a board's columns and builds
//!   the field name ↔ column id [`Bijection`]
//! - [`BoundSchema`] — a schema bound to a board and its [`BoardService`](boardlink_types::BoardService)
//! - [`Record`] — one item, with change tracking against its last saved state
//!   and create/update/delete/duplicate
//!
//! Binding itself does no I/O; fetching the column list is left to the caller
//! (see the `boardlink-sync` crate).

mod bijection;
mod error;
mod record;
mod schema;

pub use bijection::{Bijection, BijectionError};
pub use error::{RecordError, RecordResult};
pub use record::{Record, RecordBuilder};
pub use schema::{
    bind_columns, canonical_name, BindOptions, BoundSchema, FieldHook, RecordSchema,
    RecordSchemaBuilder, RESERVED_NAMES,
};
