use boardlink_fields::{FieldKind, StatusField, StatusValue};
use boardlink_model::{bind_columns, BindOptions, RecordSchema};
use boardlink_types::mock::MockBoardService;
use boardlink_types::{BoardId, BoardService, ColumnDef, ColumnId};
use std::sync::Arc;

const BOARD: BoardId = BoardId::new(77);

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("status", "Status", "color"),
        ColumnDef::new("date4", "Due Date", "date"),
        ColumnDef::new("text0", "Notes", "text"),
        ColumnDef::new("numbers", "Amount", "numeric"),
    ]
}

fn service() -> Arc<dyn BoardService> {
    Arc::new(MockBoardService::new(BOARD, columns()))
}

fn task_schema() -> RecordSchema {
    RecordSchema::builder("Task")
        .field("status", StatusField::new(StatusValue::label("Working on it")))
        .field_kind("due_date", FieldKind::Date)
        .field_kind("notes", FieldKind::Text)
        .build()
        .unwrap()
}

// ── Matching ─────────────────────────────────────────────────────

#[test]
fn fields_bind_to_canonical_titles() {
    let bound = bind_columns(task_schema(), BOARD, service(), &columns(), &BindOptions::default())
        .unwrap();
    assert_eq!(bound.column_id("due_date"), Some(&ColumnId::new("date4")));
    assert_eq!(bound.field_for_column(&ColumnId::new("text0")), Some("notes"));
    assert_eq!(bound.columns().len(), 3);
    assert!(!bound.is_bound("amount"));
    assert_eq!(bound.board(), BOARD);
    assert_eq!(bound.name(), "Task");
}

#[test]
fn remote_kind_is_compared_case_insensitively() {
    let mut cols = columns();
    cols[0].kind = "Color".into();
    assert!(bind_columns(task_schema(), BOARD, service(), &cols, &BindOptions::default()).is_ok());
}

#[test]
fn custom_separator() {
    let schema = RecordSchema::builder("Task")
        .field_kind("due-date", FieldKind::Date)
        .build()
        .unwrap();
    let options = BindOptions {
        name_separator: '-',
        ..BindOptions::default()
    };
    let bound = bind_columns(schema, BOARD, service(), &columns(), &options).unwrap();
    assert!(bound.is_bound("due-date"));
}

// ── Kind mismatch ────────────────────────────────────────────────

#[test]
fn kind_mismatch_is_fatal() {
    let schema = RecordSchema::builder("Task")
        .field_kind("notes", FieldKind::Number)
        .build()
        .unwrap();
    let err = bind_columns(schema, BOARD, service(), &columns(), &BindOptions::default())
        .unwrap_err();
    assert!(err.is_schema_declaration());
    assert_eq!(
        err.to_string(),
        "invalid schema 'Task': field 'notes' should be of kind 'numeric' but column 'text0' is 'text'"
    );
}

// ── Unused fields ────────────────────────────────────────────────

#[test]
fn unused_field_fails_by_default() {
    let schema = RecordSchema::builder("Task")
        .field_kind("status", FieldKind::Status)
        .field_kind("field_that_does_not_exist", FieldKind::Number)
        .build()
        .unwrap();
    let err = bind_columns(schema, BOARD, service(), &columns(), &BindOptions::default())
        .unwrap_err();
    assert!(err.is_schema_declaration());
    assert!(err.to_string().contains("field_that_does_not_exist"));
}

#[test]
fn unused_field_can_be_ignored() {
    let schema = RecordSchema::builder("Task")
        .field_kind("status", FieldKind::Status)
        .field_kind("field_that_does_not_exist", FieldKind::Number)
        .build()
        .unwrap();
    let options = BindOptions::default().ignore_unused_fields(true);
    let bound = bind_columns(schema, BOARD, service(), &columns(), &options).unwrap();
    assert!(bound.is_bound("status"));
    assert!(!bound.is_bound("field_that_does_not_exist"));
    assert!(bound.schema().default_field("field_that_does_not_exist").is_some());
    assert_eq!(bound.columns().len(), 1);
}

#[test]
fn later_column_wins_on_title_collision() {
    let mut cols = columns();
    cols.push(ColumnDef::new("text9", "notes", "text"));
    let bound = bind_columns(task_schema(), BOARD, service(), &cols, &BindOptions::default())
        .unwrap();
    assert_eq!(bound.column_id("notes"), Some(&ColumnId::new("text9")));
}
