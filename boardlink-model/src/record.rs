//! Change-tracked records.

use crate::error::{RecordError, RecordResult};
use crate::schema::BoundSchema;
use boardlink_fields::{Field, FieldCodec, FieldError, FieldResult, FieldValue};
use boardlink_types::{ColumnValues, GroupId, ItemId, WireItem};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// One item of a bound schema.
///
/// A record owns an independent copy of every declared field plus a backup
/// of each field as last confirmed by the store. A field is changed when it
/// differs from its backup; nothing else is tracked.
///
/// Records are built with [`Record::new`] or [`Record::builder`] and are
/// frozen once built: afterwards only declared fields, the display name and
/// already existing attributes can be changed.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<BoundSchema>,
    fields: Vec<Field>,
    backup: Vec<Field>,
    name: Option<String>,
    pending_name: Option<String>,
    id: Option<ItemId>,
    group: Option<GroupId>,
    attributes: BTreeMap<String, Value>,
    frozen: bool,
}

impl Record {
    /// Builds a record from the schema's required arguments, in the order
    /// they were declared.
    pub fn new(schema: &Arc<BoundSchema>, args: Vec<FieldValue>) -> RecordResult<Self> {
        let mut builder = Self::builder(schema);
        for arg in args {
            builder = builder.arg(arg);
        }
        builder.build()
    }

    pub fn builder(schema: &Arc<BoundSchema>) -> RecordBuilder {
        RecordBuilder {
            record: Self::blank(Arc::clone(schema)),
            args: Vec::new(),
            overrides: Vec::new(),
            attributes: Vec::new(),
            name: None,
        }
    }

    fn blank(schema: Arc<BoundSchema>) -> Self {
        let fields = schema.schema().default_fields();
        Self {
            backup: fields.clone(),
            fields,
            schema,
            name: None,
            pending_name: None,
            id: None,
            group: None,
            attributes: BTreeMap::new(),
            frozen: false,
        }
    }

    /// Builds a persisted record from an item returned by the store.
    ///
    /// Only columns bound to a declared field are read. Fields missing from
    /// the item keep their declared default, and that default stays their
    /// backup.
    pub fn from_wire(schema: &Arc<BoundSchema>, item: &WireItem) -> RecordResult<Self> {
        let mut record = Self::blank(Arc::clone(schema));
        record.frozen = true;
        record.id = Some(item.id);
        record.name = item.name.clone();
        record.group = Some(item.group.id.clone());

        for column in &item.column_values {
            let Some(index) = schema
                .field_for_column(&column.id)
                .and_then(|name| schema.schema().index_of(name))
            else {
                continue;
            };
            let field = &mut record.fields[index];
            if field.reads_display_text() {
                let text = column.text.clone().map(Value::String);
                field.decode(text.as_ref())?;
            } else {
                let value = column.parsed_value()?;
                field.decode(value.as_ref())?;
            }
            record.backup[index] = field.clone();
        }
        Ok(record)
    }

    pub fn schema(&self) -> &Arc<BoundSchema> {
        &self.schema
    }

    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    /// The confirmed display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A display name set but not yet saved.
    pub fn pending_name(&self) -> Option<&str> {
        self.pending_name.as_deref()
    }

    /// Stores a new display name, sent by the next create or update.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.pending_name = Some(name.into());
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.schema.schema().index_of(name).map(|i| &self.fields[i])
    }

    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.field(name).map(FieldCodec::to_value)
    }

    /// `(name, field)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.schema.schema().field_names().zip(self.fields.iter())
    }

    /// Assigns a plain value to a field, then runs the field's hooks.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> RecordResult<()> {
        let index = self.index_of(name)?;
        self.fields[index].set_value(value.into())?;
        self.run_hooks(index);
        Ok(())
    }

    /// Replaces a field object, then runs the field's hooks. The new field
    /// must be of the same kind.
    pub fn replace_field(&mut self, name: &str, field: impl Into<Field>) -> RecordResult<()> {
        let index = self.index_of(name)?;
        let field = field.into();
        let current = self.fields[index].kind();
        if field.kind() != current {
            return Err(FieldError::TypeMismatch {
                kind: current,
                found: field.kind().as_str(),
            }
            .into());
        }
        self.fields[index] = field;
        self.run_hooks(index);
        Ok(())
    }

    /// Mutates a field in place (for sub-values such as a phone's country
    /// code), then runs the field's hooks. Hooks do not run if `edit` fails.
    pub fn modify_field<F>(&mut self, name: &str, edit: F) -> RecordResult<()>
    where
        F: FnOnce(&mut Field) -> FieldResult<()>,
    {
        let index = self.index_of(name)?;
        edit(&mut self.fields[index])?;
        self.run_hooks(index);
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets an auxiliary attribute. Once the record is frozen only existing
    /// attributes may be set.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> RecordResult<()> {
        if self.schema.schema().index_of(name).is_some() {
            return Err(RecordError::state(format!(
                "'{name}' is a field of {}, use set_field",
                self.schema.name()
            )));
        }
        if self.frozen && !self.attributes.contains_key(name) {
            return Err(RecordError::state(format!(
                "attributes of {} cannot be added after construction ({name})",
                self.schema.name()
            )));
        }
        self.attributes.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Names of the fields that differ from their backup.
    pub fn changed_fields(&self) -> Vec<&str> {
        self.changed_indices()
            .map(|i| self.schema.schema().name_at(i))
            .collect()
    }

    pub fn has_been_changed(&self) -> bool {
        self.pending_name.is_some() || self.changed_indices().next().is_some()
    }

    /// Payload for creating this record: every bound field that encodes to
    /// a value.
    pub fn create_payload(&self) -> ColumnValues {
        self.payload(0..self.fields.len())
    }

    /// Payload for updating this record: the changed bound fields that
    /// encode to a value, plus the pending name.
    pub fn update_payload(&self) -> ColumnValues {
        let mut payload = self.payload(self.changed_indices());
        if let Some(name) = &self.pending_name {
            payload.set_name(name.clone());
        }
        payload
    }

    /// Creates the item in `group` and marks every field as saved.
    pub async fn create(&mut self, group: impl Into<GroupId>) -> RecordResult<ItemId> {
        if let Some(id) = self.id {
            return Err(RecordError::state(format!(
                "the item already exists (id = {id})"
            )));
        }
        let group = group.into();
        let payload = self.create_payload();
        let schema = Arc::clone(&self.schema);
        let id = schema
            .service()
            .create_item(schema.board(), &group, self.pending_name.as_deref(), &payload)
            .await?;
        info!(
            schema = schema.name(),
            board = %schema.board(),
            item = %id,
            group = %group,
            columns = payload.len(),
            "created item"
        );

        self.id = Some(id);
        self.backup = self.fields.clone();
        self.name = self.pending_name.take();
        self.group = Some(group);
        Ok(id)
    }

    /// Sends the changed fields and pending name. Does nothing, without
    /// calling the store, when nothing changed.
    pub async fn update(&mut self) -> RecordResult<()> {
        let Some(id) = self.id else {
            return Err(RecordError::state(
                "cannot update an item that was never created, did you mean create()?",
            ));
        };
        if !self.has_been_changed() {
            debug!(schema = self.schema.name(), item = %id, "no changes to update");
            return Ok(());
        }

        let payload = self.update_payload();
        let schema = Arc::clone(&self.schema);
        schema
            .service()
            .update_item(schema.board(), id, &payload)
            .await?;
        info!(
            schema = schema.name(),
            board = %schema.board(),
            item = %id,
            columns = payload.len(),
            "updated item"
        );

        if let Some(name) = self.pending_name.take() {
            self.name = Some(name);
        }
        self.backup = self.fields.clone();
        Ok(())
    }

    /// Deletes the item. The record keeps its values but can no longer be
    /// updated, deleted or duplicated.
    pub async fn delete(&mut self) -> RecordResult<()> {
        let Some(id) = self.id else {
            return Err(RecordError::state(
                "cannot delete an item that was never created",
            ));
        };
        self.schema.service().delete_item(id).await?;
        info!(schema = self.schema.name(), item = %id, "deleted item");
        self.pending_name = None;
        self.id = None;
        Ok(())
    }

    /// Creates a copy of this item in the same group and returns it.
    ///
    /// The copy is created under this record's pending name, or its
    /// confirmed name when none is pending.
    pub async fn duplicate(&self) -> RecordResult<Record> {
        let Some(id) = self.id else {
            return Err(RecordError::state(
                "cannot duplicate an item that was never created",
            ));
        };
        let Some(group) = self.group.clone() else {
            return Err(RecordError::state(format!(
                "cannot duplicate item {id}: it has no group"
            )));
        };

        let mut copy = self.clone();
        copy.id = None;
        if copy.pending_name.is_none() {
            copy.pending_name = self.name.clone();
        }
        let new_id = copy.create(group).await?;
        debug!(schema = self.schema.name(), source = %id, copy = %new_id, "duplicated item");
        Ok(copy)
    }

    fn index_of(&self, name: &str) -> RecordResult<usize> {
        self.schema.schema().index_of(name).ok_or_else(|| {
            RecordError::state(format!(
                "'{name}' is not a field of {}",
                self.schema.name()
            ))
        })
    }

    fn run_hooks(&self, index: usize) {
        for hook in self.schema.schema().hooks_at(index) {
            hook(self);
        }
    }

    fn changed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields
            .iter()
            .zip(&self.backup)
            .enumerate()
            .filter(|(_, (current, saved))| current != saved)
            .map(|(i, _)| i)
    }

    fn payload(&self, indices: impl Iterator<Item = usize>) -> ColumnValues {
        let mut payload = ColumnValues::new();
        for index in indices {
            let name = self.schema.schema().name_at(index);
            let Some(column) = self.schema.column_id(name) else {
                continue;
            };
            if let Some(value) = self.fields[index].encode() {
                payload.insert(column, value);
            }
        }
        payload
    }
}

/// Records are equal when all their field values are equal.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<String>| v.unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "{} (Id: {} | Name: {} | Group Id: {}):",
            self.schema.name(),
            show(self.id.map(|id| id.to_string())),
            show(self.name.clone()),
            show(self.group.as_ref().map(ToString::to_string)),
        )?;
        for (name, field) in self.fields() {
            let column = self
                .schema
                .column_id(name)
                .map_or("unbound", |c| c.as_str());
            let label = format!("\t{name} <{column}>: ");
            write!(f, "\n{label:<48}{}({field})", field.kind())?;
        }
        Ok(())
    }
}

/// Builder for [`Record`]. Positional arguments, keyword overrides and
/// auxiliary attributes are applied by [`build`](Self::build), which then
/// freezes the record.
pub struct RecordBuilder {
    record: Record,
    args: Vec<FieldValue>,
    overrides: Vec<(String, FieldValue)>,
    attributes: Vec<(String, Value)>,
    name: Option<String>,
}

impl RecordBuilder {
    /// Adds the next positional (required) argument.
    pub fn arg(mut self, value: impl Into<FieldValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Overrides a field's default.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.overrides.push((field.into(), value.into()));
        self
    }

    /// Sets the display name sent on create.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds an auxiliary attribute that stays settable after construction.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> RecordResult<Record> {
        let mut record = self.record;
        let schema = Arc::clone(&record.schema);
        let required = schema.schema().required();
        if self.args.len() != required.len() {
            return Err(RecordError::state(format!(
                "{} expects arguments {required:?} but {} given",
                schema.name(),
                self.args.len()
            )));
        }
        for (name, value) in required.iter().zip(self.args) {
            record.set_field(name, value)?;
        }

        for (name, value) in self.overrides {
            if schema.schema().index_of(&name).is_none() {
                return Err(RecordError::state(format!(
                    "unexpected keyword argument '{name}' for {}",
                    schema.name()
                )));
            }
            record.set_field(&name, value)?;
        }

        for (name, value) in self.attributes {
            record.set_attribute(&name, value)?;
        }
        record.pending_name = self.name;
        record.frozen = true;
        Ok(record)
    }
}
