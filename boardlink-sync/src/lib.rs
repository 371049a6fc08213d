//! Board access for bound record schemas.
//!
//! - [`SchemaBinder`] / [`bind_schema`] — read a board's columns and bind a
//!   [`RecordSchema`](boardlink_model::RecordSchema) to them
//! - [`SyncEngine`] — fetch every item, items matching one column, or the
//!   board's group ids
//! - [`retry_when_rate_limited`] — rerun an operation while the service
//!   reports an exhausted complexity budget

mod binder;
mod engine;
mod error;
mod retry;

pub use binder::{bind_schema, SchemaBinder};
pub use engine::{RecordIter, SyncEngine};
pub use error::{SyncError, SyncResult};
pub use retry::{retry_when_rate_limited, RateLimited, RetryPolicy};
