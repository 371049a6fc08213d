//! Record schemas and schema binding.
//!
//! A [`RecordSchema`] is declared once with [`RecordSchema::builder`]: an
//! ordered list of named fields, the fields that must be passed as
//! positional constructor arguments, and per-field update hooks.
//! [`bind_columns`] then checks the declaration against a board's column
//! list and produces a [`BoundSchema`], which is what records are built
//! from.

use crate::bijection::Bijection;
use crate::error::{RecordError, RecordResult};
use crate::record::Record;
use boardlink_fields::{Field, FieldCodec, FieldKind};
use boardlink_types::{BoardId, BoardService, ColumnDef, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Names a schema may not use for its fields.
pub const RESERVED_NAMES: &[&str] = &[
    "id",
    "name",
    "item_id",
    "item_name",
    "group_id",
    "board_id",
    "fields",
];

/// Callback run after every successful mutation of a field.
pub type FieldHook = Arc<dyn Fn(&Record) + Send + Sync>;

/// Options for [`bind_columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
    /// Keep declared fields that match no column instead of failing.
    pub ignore_unused_fields: bool,
    /// Character that replaces spaces when column titles are canonicalized.
    pub name_separator: char,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            ignore_unused_fields: false,
            name_separator: '_',
        }
    }
}

impl BindOptions {
    pub fn ignore_unused_fields(mut self, ignore: bool) -> Self {
        self.ignore_unused_fields = ignore;
        self
    }
}

/// Canonical field name for a column title: lowercased, with spaces
/// replaced by `separator` (`"My Column"` → `"my_column"`).
pub fn canonical_name(title: &str, separator: char) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { separator } else { c })
        .collect()
}

#[derive(Clone)]
struct FieldDecl {
    name: String,
    default: Field,
    hooks: Vec<FieldHook>,
}

/// A declared record type: named fields with their default values.
#[derive(Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDecl>,
    required: Vec<String>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            required: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|d| d.name.as_str())
    }

    /// The declared default of a field.
    pub fn default_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|d| d.name == name).map(|d| &d.default)
    }

    /// Names of the fields passed positionally to [`Record::new`].
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|d| d.name == name)
    }

    pub(crate) fn name_at(&self, index: usize) -> &str {
        &self.fields[index].name
    }

    pub(crate) fn hooks_at(&self, index: usize) -> &[FieldHook] {
        &self.fields[index].hooks
    }

    /// Fresh copies of every declared default, in declaration order.
    pub(crate) fn default_fields(&self) -> Vec<Field> {
        self.fields.iter().map(|d| d.default.clone()).collect()
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<(&str, FieldKind)> = self
            .fields
            .iter()
            .map(|d| (d.name.as_str(), d.default.kind()))
            .collect();
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &fields)
            .field("required", &self.required)
            .finish()
    }
}

/// Builder for [`RecordSchema`].
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<FieldDecl>,
    required: Vec<String>,
    hooks: Vec<(String, FieldHook)>,
}

impl RecordSchemaBuilder {
    /// Declares a field with the given default.
    pub fn field(mut self, name: impl Into<String>, default: impl Into<Field>) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            default: default.into(),
            hooks: Vec::new(),
        });
        self
    }

    /// Declares an empty field of the given kind.
    pub fn field_kind(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(name, Field::from_kind(kind))
    }

    /// Makes a declared field a positional constructor argument.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Registers a hook on a declared field. Hooks of one field run in
    /// registration order.
    pub fn on_update<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        self.hooks.push((name.into(), Arc::new(hook)));
        self
    }

    pub fn build(self) -> RecordResult<RecordSchema> {
        let schema = self.name;
        let mut fields: Vec<FieldDecl> = Vec::with_capacity(self.fields.len());
        for decl in self.fields {
            if RESERVED_NAMES.contains(&decl.name.as_str()) {
                return Err(RecordError::schema(
                    &schema,
                    format!("field name '{}' is reserved", decl.name),
                ));
            }
            if fields.iter().any(|d| d.name == decl.name) {
                return Err(RecordError::schema(
                    &schema,
                    format!("field '{}' is declared twice", decl.name),
                ));
            }
            fields.push(decl);
        }

        for (i, name) in self.required.iter().enumerate() {
            if !fields.iter().any(|d| &d.name == name) {
                return Err(RecordError::schema(
                    &schema,
                    format!("required argument '{name}' is not a declared field"),
                ));
            }
            if self.required[..i].contains(name) {
                return Err(RecordError::schema(
                    &schema,
                    format!("required argument '{name}' is listed twice"),
                ));
            }
        }

        for (name, hook) in self.hooks {
            let Some(decl) = fields.iter_mut().find(|d| d.name == name) else {
                return Err(RecordError::schema(
                    &schema,
                    format!("hook registered on undeclared field '{name}'"),
                ));
            };
            decl.hooks.push(hook);
        }

        Ok(RecordSchema {
            name: schema,
            fields,
            required: self.required,
        })
    }
}

/// A schema bound to a board: every matched field knows its column id.
///
/// Fields left unmatched under [`BindOptions::ignore_unused_fields`] stay
/// declared but have no column; records never send or receive them.
pub struct BoundSchema {
    schema: RecordSchema,
    board: BoardId,
    service: Arc<dyn BoardService>,
    columns: Bijection<String, ColumnId>,
}

impl BoundSchema {
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn board(&self) -> BoardId {
        self.board
    }

    pub fn service(&self) -> &Arc<dyn BoardService> {
        &self.service
    }

    /// The field name ↔ column id mapping.
    pub fn columns(&self) -> &Bijection<String, ColumnId> {
        &self.columns
    }

    /// Column id bound to a field.
    pub fn column_id(&self, field: &str) -> Option<&ColumnId> {
        self.columns.get_by_left(field)
    }

    /// Field bound to a column id.
    pub fn field_for_column(&self, column: &ColumnId) -> Option<&str> {
        self.columns.get_by_right(column).map(String::as_str)
    }

    pub fn is_bound(&self, field: &str) -> bool {
        self.columns.contains_left(field)
    }
}

impl fmt::Debug for BoundSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundSchema")
            .field("schema", &self.schema)
            .field("board", &self.board)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// Checks `schema` against a board's columns and binds it.
///
/// Each declared field is matched to the column whose canonical title equals
/// the field name. A matched column must have the field's kind. A field with
/// no column fails the binding unless `options.ignore_unused_fields` is set.
pub fn bind_columns(
    schema: RecordSchema,
    board: BoardId,
    service: Arc<dyn BoardService>,
    columns: &[ColumnDef],
    options: &BindOptions,
) -> RecordResult<BoundSchema> {
    let mut by_name: HashMap<String, &ColumnDef> = HashMap::with_capacity(columns.len());
    for column in columns {
        let canonical = canonical_name(&column.title, options.name_separator);
        if let Some(previous) = by_name.insert(canonical, column) {
            warn!(
                board = %board,
                first = %previous.id,
                second = %column.id,
                title = %column.title,
                "columns share a canonical title, using the later one"
            );
        }
    }

    let mut bound = Bijection::new();
    let mut unused = Vec::new();
    for decl in &schema.fields {
        let Some(column) = by_name.get(decl.name.as_str()) else {
            unused.push(decl.name.as_str());
            continue;
        };
        let expected = decl.default.kind();
        if !expected.matches_tag(&column.kind) {
            return Err(RecordError::schema(
                &schema.name,
                format!(
                    "field '{}' should be of kind '{expected}' but column '{}' is '{}'",
                    decl.name,
                    column.id,
                    column.kind.to_lowercase()
                ),
            ));
        }
        bound
            .insert(decl.name.clone(), column.id.clone())
            .map_err(|e| RecordError::schema(&schema.name, e.to_string()))?;
    }

    if let Some(first) = unused.first() {
        if !options.ignore_unused_fields {
            return Err(RecordError::schema(
                &schema.name,
                format!("field '{first}' is declared but matches no column on board {board}"),
            ));
        }
        debug!(schema = %schema.name, fields = ?unused, "ignoring unused fields");
    }

    debug!(
        schema = %schema.name,
        board = %board,
        bound = bound.len(),
        declared = schema.len(),
        "schema bound"
    );

    Ok(BoundSchema {
        schema,
        board,
        service,
        columns: bound,
    })
}
