//! Board service abstraction.
//!
//! The core never talks to the network itself. Everything it needs from the
//! remote store goes through this trait, so a GraphQL client, a test double,
//! or a rate-limited wrapper can all sit behind it.

use crate::error::RemoteResult;
use crate::ids::{BoardId, ColumnId, GroupId, ItemId};
use crate::wire::{ColumnDef, ColumnValues, WireItem};
use async_trait::async_trait;

/// Remote operations consumed by schema binding, records and fetches.
///
/// Implementations must turn any `errors` list in a response into
/// [`RemoteError::Reported`](crate::RemoteError::Reported) (see
/// [`check_response`](crate::check_response)).
#[async_trait]
pub trait BoardService: Send + Sync {
    /// Returns the column definitions of a board.
    async fn fetch_schema(&self, board: BoardId) -> RemoteResult<Vec<ColumnDef>>;

    /// Creates an item and returns its new id.
    async fn create_item(
        &self,
        board: BoardId,
        group: &GroupId,
        name: Option<&str>,
        columns: &ColumnValues,
    ) -> RemoteResult<ItemId>;

    /// Changes several column values (and optionally the name) of an item.
    async fn update_item(
        &self,
        board: BoardId,
        item: ItemId,
        columns: &ColumnValues,
    ) -> RemoteResult<()>;

    /// Deletes an item.
    async fn delete_item(&self, item: ItemId) -> RemoteResult<()>;

    /// Returns every item on a board.
    async fn query_items(&self, board: BoardId) -> RemoteResult<Vec<WireItem>>;

    /// Returns the items whose column equals the given search representation.
    async fn query_items_by_column(
        &self,
        board: BoardId,
        column: &ColumnId,
        representation: &str,
    ) -> RemoteResult<Vec<WireItem>>;

    /// Returns the group ids defined on a board.
    async fn list_groups(&self, board: BoardId) -> RemoteResult<Vec<GroupId>>;
}
