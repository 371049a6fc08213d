//! An in-memory board service for testing.
//!
//! Keeps one board's columns, groups and items in memory, records every
//! call it receives, and can be told to fail the next call with a
//! server-style error list.

use crate::error::{RemoteError, RemoteResult};
use crate::ids::{BoardId, ColumnId, GroupId, ItemId};
use crate::service::BoardService;
use crate::wire::{ColumnDef, ColumnValues, WireColumnValue, WireGroup, WireItem, NAME_KEY};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A call received by [`MockBoardService`].
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    FetchSchema {
        board: BoardId,
    },
    CreateItem {
        board: BoardId,
        group: GroupId,
        name: Option<String>,
        columns: ColumnValues,
    },
    UpdateItem {
        board: BoardId,
        item: ItemId,
        columns: ColumnValues,
    },
    DeleteItem {
        item: ItemId,
    },
    QueryItems {
        board: BoardId,
    },
    QueryItemsByColumn {
        board: BoardId,
        column: ColumnId,
        representation: String,
    },
    ListGroups {
        board: BoardId,
    },
}

#[derive(Debug)]
struct MockState {
    columns: Vec<ColumnDef>,
    groups: Vec<GroupId>,
    items: Vec<WireItem>,
    next_id: u64,
    calls: Vec<ServiceCall>,
    fail_next: Option<Vec<Value>>,
}

/// A mock board service backed by a single in-memory board.
#[derive(Debug)]
pub struct MockBoardService {
    board: BoardId,
    state: Mutex<MockState>,
}

impl MockBoardService {
    /// Creates a mock board with the given columns and no items.
    pub fn new(board: BoardId, columns: Vec<ColumnDef>) -> Self {
        Self {
            board,
            state: Mutex::new(MockState {
                columns,
                groups: Vec::new(),
                items: Vec::new(),
                next_id: 1000,
                calls: Vec::new(),
                fail_next: None,
            }),
        }
    }

    /// Sets the groups reported by `list_groups`.
    pub fn with_groups<I, G>(self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        self.state().groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Seeds the board with items.
    pub fn with_items(self, items: Vec<WireItem>) -> Self {
        self.state().items = items;
        self
    }

    /// The board this mock serves.
    pub fn board(&self) -> BoardId {
        self.board
    }

    /// Adds a single item to the board.
    pub fn add_item(&self, item: WireItem) {
        self.state().items.push(item);
    }

    /// Makes the next call fail with the given raw `errors` list.
    pub fn fail_next(&self, errors: Vec<Value>) {
        self.state().fail_next = Some(errors);
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// A snapshot of the items currently on the board.
    pub fn items(&self) -> Vec<WireItem> {
        self.state().items.clone()
    }

    /// Looks up a stored item.
    pub fn item(&self, id: ItemId) -> Option<WireItem> {
        self.state().items.iter().find(|i| i.id == id).cloned()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the call, then either fails it (if armed) or checks the board.
    fn begin(&self, call: ServiceCall, board: Option<BoardId>) -> RemoteResult<MutexGuard<'_, MockState>> {
        let mut state = self.state();
        state.calls.push(call);
        if let Some(errors) = state.fail_next.take() {
            return Err(RemoteError::from_errors(&errors));
        }
        if let Some(board) = board.filter(|b| *b != self.board) {
            return Err(RemoteError::message(format!("Board {board} not found")));
        }
        Ok(state)
    }
}

#[async_trait]
impl BoardService for MockBoardService {
    async fn fetch_schema(&self, board: BoardId) -> RemoteResult<Vec<ColumnDef>> {
        let state = self.begin(ServiceCall::FetchSchema { board }, Some(board))?;
        Ok(state.columns.clone())
    }

    async fn create_item(
        &self,
        board: BoardId,
        group: &GroupId,
        name: Option<&str>,
        columns: &ColumnValues,
    ) -> RemoteResult<ItemId> {
        let call = ServiceCall::CreateItem {
            board,
            group: group.clone(),
            name: name.map(str::to_string),
            columns: columns.clone(),
        };
        let mut state = self.begin(call, Some(board))?;
        let id = ItemId::new(state.next_id);
        state.next_id += 1;
        let column_values = columns
            .columns()
            .map(|(column, value)| stored_value(column, value))
            .collect();
        state.items.push(WireItem {
            id,
            name: name.map(str::to_string),
            group: WireGroup { id: group.clone() },
            column_values,
        });
        Ok(id)
    }

    async fn update_item(
        &self,
        board: BoardId,
        item: ItemId,
        columns: &ColumnValues,
    ) -> RemoteResult<()> {
        let call = ServiceCall::UpdateItem {
            board,
            item,
            columns: columns.clone(),
        };
        let mut state = self.begin(call, Some(board))?;
        let Some(stored) = state.items.iter_mut().find(|i| i.id == item) else {
            return Err(RemoteError::message(format!("Item {item} not found")));
        };
        for (key, value) in columns.iter() {
            if key == NAME_KEY {
                stored.name = value.as_str().map(str::to_string);
                continue;
            }
            let updated = stored_value(key, value);
            match stored.column_values.iter_mut().find(|c| c.id.as_str() == key) {
                Some(existing) => *existing = updated,
                None => stored.column_values.push(updated),
            }
        }
        Ok(())
    }

    async fn delete_item(&self, item: ItemId) -> RemoteResult<()> {
        let mut state = self.begin(ServiceCall::DeleteItem { item }, None)?;
        let before = state.items.len();
        state.items.retain(|i| i.id != item);
        if state.items.len() == before {
            return Err(RemoteError::message(format!("Item {item} not found")));
        }
        Ok(())
    }

    async fn query_items(&self, board: BoardId) -> RemoteResult<Vec<WireItem>> {
        let state = self.begin(ServiceCall::QueryItems { board }, Some(board))?;
        Ok(state.items.clone())
    }

    async fn query_items_by_column(
        &self,
        board: BoardId,
        column: &ColumnId,
        representation: &str,
    ) -> RemoteResult<Vec<WireItem>> {
        let call = ServiceCall::QueryItemsByColumn {
            board,
            column: column.clone(),
            representation: representation.to_string(),
        };
        let state = self.begin(call, Some(board))?;
        Ok(state
            .items
            .iter()
            .filter(|item| {
                item.column(column)
                    .and_then(|c| c.text.as_deref())
                    .is_some_and(|text| text == representation)
            })
            .cloned()
            .collect())
    }

    async fn list_groups(&self, board: BoardId) -> RemoteResult<Vec<GroupId>> {
        let state = self.begin(ServiceCall::ListGroups { board }, Some(board))?;
        Ok(state.groups.clone())
    }
}

fn stored_value(column: &str, value: &Value) -> WireColumnValue {
    let stored = WireColumnValue::encoded(column, value);
    match display_text(value) {
        Some(text) => stored.with_text(text),
        None => stored,
    }
}

/// Approximates the display text the store renders for a written value.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["label", "text", "email", "countryCode"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
