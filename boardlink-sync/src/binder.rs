//! Binding a declared schema to a live board.

use crate::error::SyncResult;
use boardlink_model::{bind_columns, BindOptions, BoundSchema, RecordError, RecordSchema};
use boardlink_types::{BoardId, BoardService};
use std::sync::Arc;
use tracing::info;

/// Binds a [`RecordSchema`] to a board, reading the board's columns through
/// a [`BoardService`].
///
/// ```no_run
/// # use std::sync::Arc;
/// # use boardlink_fields::FieldKind;
/// # use boardlink_model::RecordSchema;
/// # use boardlink_sync::SchemaBinder;
/// # use boardlink_types::{BoardId, BoardService};
/// # async fn example(service: Arc<dyn BoardService>) -> boardlink_sync::SyncResult<()> {
/// let schema = RecordSchema::builder("Task")
///     .field_kind("status", FieldKind::Status)
///     .build()?;
/// let bound = SchemaBinder::new(schema)
///     .board(BoardId::new(123))
///     .service(service)
///     .bind()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct SchemaBinder {
    schema: RecordSchema,
    board: Option<BoardId>,
    service: Option<Arc<dyn BoardService>>,
    options: BindOptions,
}

impl SchemaBinder {
    pub fn new(schema: RecordSchema) -> Self {
        Self {
            schema,
            board: None,
            service: None,
            options: BindOptions::default(),
        }
    }

    pub fn board(mut self, board: BoardId) -> Self {
        self.board = Some(board);
        self
    }

    pub fn service(mut self, service: Arc<dyn BoardService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetches the board's columns once and binds the schema to them.
    pub async fn bind(self) -> SyncResult<Arc<BoundSchema>> {
        let name = self.schema.name().to_string();
        let Some(board) = self.board else {
            return Err(declaration(name, "a board id must be provided"));
        };
        let Some(service) = self.service else {
            return Err(declaration(name, "a board service must be provided"));
        };

        let columns = service.fetch_schema(board).await?;
        info!(schema = %name, board = %board, columns = columns.len(), "fetched board columns");

        let bound = bind_columns(self.schema, board, service, &columns, &self.options)?;
        Ok(Arc::new(bound))
    }
}

/// Shorthand for [`SchemaBinder`] with every part given.
pub async fn bind_schema(
    schema: RecordSchema,
    board: BoardId,
    service: Arc<dyn BoardService>,
    options: BindOptions,
) -> SyncResult<Arc<BoundSchema>> {
    SchemaBinder::new(schema)
        .board(board)
        .service(service)
        .options(options)
        .bind()
        .await
}

fn declaration(schema: String, message: &str) -> crate::SyncError {
    RecordError::SchemaDeclaration {
        schema,
        message: message.to_string(),
    }
    .into()
}
