//! Core type definitions for boardlink.
//!
//! This crate defines the board-store vocabulary shared by every other
//! boardlink crate:
//! - Board, item, group and column identifiers
//! - The loosely-typed wire shapes exchanged with a board store
//! - The [`BoardService`] contract the core consumes (but never implements)
//! - [`RemoteError`], the typed form of a server-reported error list
//!
//! Field codecs, schemas and records live in their own crates and only ever
//! talk to the remote store through [`BoardService`].

mod error;
mod ids;
pub mod mock;
mod service;
mod wire;

pub use error::{check_response, RemoteError, RemoteResult, RATE_LIMIT_MARKER};
pub use ids::{BoardId, ColumnId, GroupId, ItemId};
pub use service::BoardService;
pub use wire::{ColumnDef, ColumnValues, WireColumnValue, WireGroup, WireItem, NAME_KEY};
