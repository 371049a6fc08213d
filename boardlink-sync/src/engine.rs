//! Fetching items from a bound board as records.

use crate::error::{SyncError, SyncResult};
use boardlink_fields::{FieldCodec, FieldValue};
use boardlink_model::{BoundSchema, Record, RecordResult};
use boardlink_types::{GroupId, WireItem};
use std::sync::Arc;
use tracing::debug;

/// Reads items of one bound schema from its board.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    schema: Arc<BoundSchema>,
}

impl SyncEngine {
    pub fn new(schema: Arc<BoundSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<BoundSchema> {
        &self.schema
    }

    /// Fetches every item on the board.
    ///
    /// Items are decoded lazily as the returned iterator is advanced.
    pub async fn fetch_all(&self) -> SyncResult<RecordIter> {
        let board = self.schema.board();
        let items = self.schema.service().query_items(board).await?;
        debug!(schema = %self.schema.name(), board = %board, items = items.len(), "fetched items");
        Ok(RecordIter::new(self.schema.clone(), items))
    }

    /// Fetches the items whose `field` column equals `value`.
    ///
    /// The value goes through the field's own setter to produce the search
    /// text, so kinds that cannot be searched fail before any request is made.
    pub async fn fetch_by_column(
        &self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> SyncResult<RecordIter> {
        let unbound = || SyncError::UnboundField {
            schema: self.schema.name().to_string(),
            field: field.to_string(),
        };
        let column = self.schema.column_id(field).ok_or_else(unbound)?;
        let mut probe = self
            .schema
            .schema()
            .default_field(field)
            .cloned()
            .ok_or_else(unbound)?;
        probe.set_value(value.into())?;
        let representation = probe.search_representation()?;

        let board = self.schema.board();
        debug!(
            schema = %self.schema.name(),
            column = %column,
            representation = %representation,
            "searching items by column"
        );
        let items = self
            .schema
            .service()
            .query_items_by_column(board, column, &representation)
            .await?;
        Ok(RecordIter::new(self.schema.clone(), items))
    }

    /// Lists the ids of the board's groups.
    pub async fn fetch_group_ids(&self) -> SyncResult<Vec<GroupId>> {
        Ok(self.schema.service().list_groups(self.schema.board()).await?)
    }
}

/// A single pass over fetched items, decoding each into a [`Record`].
///
/// An item that fails to decode yields its error without ending the pass.
#[derive(Debug)]
pub struct RecordIter {
    schema: Arc<BoundSchema>,
    items: std::vec::IntoIter<WireItem>,
}

impl RecordIter {
    fn new(schema: Arc<BoundSchema>, items: Vec<WireItem>) -> Self {
        Self {
            schema,
            items: items.into_iter(),
        }
    }
}

impl Iterator for RecordIter {
    type Item = RecordResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        Some(Record::from_wire(&self.schema, &item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for RecordIter {}
