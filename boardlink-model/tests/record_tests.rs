use boardlink_fields::{
    CheckboxField, Field, FieldCodec, FieldKind, FieldValue, Location, Phone, PhoneField, StatusField,
    StatusValue, TextField,
};
use boardlink_model::{bind_columns, BindOptions, BoundSchema, Record, RecordSchema};
use boardlink_types::mock::{MockBoardService, ServiceCall};
use boardlink_types::{
    BoardId, ColumnDef, ColumnId, ColumnValues, GroupId, ItemId, WireColumnValue, WireGroup,
    WireItem,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};

const BOARD: BoardId = BoardId::new(77);

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("status", "Status", "color"),
        ColumnDef::new("date4", "Due Date", "date"),
        ColumnDef::new("check", "Done", "boolean"),
        ColumnDef::new("text0", "Notes", "text"),
        ColumnDef::new("numbers", "Amount", "numeric"),
        ColumnDef::new("phone", "Phone", "phone"),
        ColumnDef::new("mirror", "Owner", "lookup"),
    ]
}

fn mock() -> Arc<MockBoardService> {
    Arc::new(MockBoardService::new(BOARD, columns()).with_groups(["topics", "done"]))
}

fn bind(schema: RecordSchema, service: &Arc<MockBoardService>) -> Arc<BoundSchema> {
    let options = BindOptions::default().ignore_unused_fields(true);
    Arc::new(bind_columns(schema, BOARD, service.clone(), &columns(), &options).unwrap())
}

fn task_schema() -> RecordSchema {
    RecordSchema::builder("Task")
        .field("status", StatusField::new(StatusValue::label("Working on it")))
        .field_kind("due_date", FieldKind::Date)
        .field("done", CheckboxField::default())
        .field_kind("notes", FieldKind::Text)
        .field_kind("amount", FieldKind::Number)
        .build()
        .unwrap()
}

fn last_call(service: &MockBoardService) -> ServiceCall {
    service.calls().pop().unwrap()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_record_holds_defaults() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let record = Record::new(&schema, vec![]).unwrap();
    assert_eq!(
        record.value("status"),
        Some(FieldValue::Status(StatusValue::label("Working on it")))
    );
    assert_eq!(record.value("done"), Some(FieldValue::Bool(false)));
    assert!(record.is_frozen());
    assert!(!record.has_been_changed());
    assert_eq!(record.id(), None);
}

#[test]
fn keyword_overrides_go_through_setters() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let record = Record::builder(&schema)
        .set("status", 1u64)
        .set("done", true)
        .build()
        .unwrap();
    assert_eq!(record.value("status"), Some(FieldValue::Status(StatusValue::Index(1))));
    assert_eq!(record.value("done"), Some(FieldValue::Bool(true)));
    assert_eq!(record.changed_fields(), vec!["status", "done"]);
}

#[test]
fn unknown_keyword_fails() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let err = Record::builder(&schema).set("owner", "me").build().unwrap_err();
    assert!(err.is_state());
    assert!(err.to_string().contains("owner"));
}

#[test]
fn keyword_validation_errors_surface() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let err = Record::builder(&schema).set("done", "yes").build().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn required_arguments_are_positional() {
    let service = mock();
    let schema = RecordSchema::builder("Task")
        .field_kind("notes", FieldKind::Text)
        .field_kind("status", FieldKind::Status)
        .required("notes")
        .required("status")
        .build()
        .unwrap();
    let schema = bind(schema, &service);

    let record = Record::new(&schema, vec!["call back".into(), "Stuck".into()]).unwrap();
    assert_eq!(record.value("notes"), Some(FieldValue::from("call back")));
    assert_eq!(
        record.value("status"),
        Some(FieldValue::Status(StatusValue::label("Stuck")))
    );

    let err = Record::new(&schema, vec!["only one".into()]).unwrap_err();
    assert!(err.is_state());
    assert!(err.to_string().contains("[\"notes\", \"status\"]"));
}

#[test]
fn instances_do_not_share_fields() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut a = Record::new(&schema, vec![]).unwrap();
    let b = Record::new(&schema, vec![]).unwrap();
    a.set_field("notes", "only on a").unwrap();
    assert_eq!(b.value("notes"), Some(FieldValue::Null));
    assert_ne!(a, b);
}

// ── Attributes ───────────────────────────────────────────────────

#[test]
fn attributes_are_fixed_after_build() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::builder(&schema)
        .attribute("source", "import")
        .build()
        .unwrap();

    record.set_attribute("source", "manual").unwrap();
    assert_eq!(record.attribute("source"), Some(&json!("manual")));

    let err = record.set_attribute("new_attribute", 1).unwrap_err();
    assert!(err.is_state());
    assert!(err.to_string().contains("new_attribute"));

    assert!(record.set_attribute("notes", "x").unwrap_err().is_state());
}

#[test]
fn undeclared_field_is_a_state_error() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    let err = record.set_field("owner", "me").unwrap_err();
    assert!(err.is_state());
    assert_eq!(err.to_string(), "invalid record state: 'owner' is not a field of Task");
}

// ── Mutation ─────────────────────────────────────────────────────

#[test]
fn replace_field_keeps_kind() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();

    record
        .replace_field("status", StatusField::new(StatusValue::Index(7)))
        .unwrap();
    assert_eq!(record.value("status"), Some(FieldValue::Status(StatusValue::Index(7))));

    let err = record.replace_field("status", TextField::new("x")).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn modify_field_edits_sub_values() {
    let service = mock();
    let schema = RecordSchema::builder("Contact")
        .field("phone", PhoneField::new())
        .build()
        .unwrap();
    let schema = bind(schema, &service);
    let mut record = Record::new(&schema, vec![]).unwrap();

    record
        .modify_field("phone", |f| match f.as_phone_mut() {
            Some(phone) => {
                phone.set_phone(Some("0501234567".into()));
                phone.set_country_code(Some("IL"))
            }
            None => Ok(()),
        })
        .unwrap();
    assert_eq!(
        record.value("phone"),
        Some(FieldValue::Phone(Phone::new("0501234567", "IL")))
    );

    let err = record
        .modify_field("phone", |f| {
            f.as_phone_mut()
                .map_or(Ok(()), |p| p.set_country_code(Some("XX")))
        })
        .unwrap_err();
    assert!(err.is_validation());
}

// ── Hooks ────────────────────────────────────────────────────────

#[test]
fn hooks_fire_in_registration_order() {
    let service = mock();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (log.clone(), log.clone());
    let schema = RecordSchema::builder("Task")
        .field_kind("status", FieldKind::Status)
        .field_kind("notes", FieldKind::Text)
        .on_update("status", move |record: &Record| {
            first.lock().unwrap().push(format!("first: {:?}", record.value("status")));
        })
        .on_update("status", move |_: &Record| {
            second.lock().unwrap().push("second".to_string());
        })
        .build()
        .unwrap();
    let schema = bind(schema, &service);
    let mut record = Record::new(&schema, vec![]).unwrap();

    record.set_field("notes", "no hooks here").unwrap();
    assert!(log.lock().unwrap().is_empty());

    record.set_field("status", "Done").unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "first: Some(Status(Label(\"Done\")))".to_string(),
            "second".to_string()
        ]
    );

    record
        .replace_field("status", StatusField::new(StatusValue::Index(2)))
        .unwrap();
    assert_eq!(log.lock().unwrap().len(), 4);
}

#[test]
fn hooks_do_not_fire_on_rejected_values() {
    let service = mock();
    let count = Arc::new(Mutex::new(0));
    let counter = count.clone();
    let schema = RecordSchema::builder("Task")
        .field_kind("done", FieldKind::Checkbox)
        .on_update("done", move |_: &Record| *counter.lock().unwrap() += 1)
        .build()
        .unwrap();
    let schema = bind(schema, &service);
    let mut record = Record::new(&schema, vec![]).unwrap();

    assert!(record.set_field("done", 3).is_err());
    record.set_field("done", true).unwrap();
    assert_eq!(*count.lock().unwrap(), 1);
}

// ── Create / update ──────────────────────────────────────────────

#[tokio::test]
async fn create_sends_every_encodable_field() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::builder(&schema).name("Write docs").build().unwrap();
    record.set_field("amount", 12).unwrap();

    let id = record.create("topics").await.unwrap();

    let mut expected = ColumnValues::new();
    expected.insert(&ColumnId::new("status"), json!({"label": "Working on it"}));
    expected.insert(&ColumnId::new("date4"), json!({}));
    expected.insert(&ColumnId::new("check"), json!({}));
    expected.insert(&ColumnId::new("numbers"), json!("12"));
    assert_eq!(
        last_call(&service),
        ServiceCall::CreateItem {
            board: BOARD,
            group: GroupId::new("topics"),
            name: Some("Write docs".into()),
            columns: expected,
        }
    );
    assert_eq!(record.id(), Some(id));
    assert_eq!(record.name(), Some("Write docs"));
    assert_eq!(record.pending_name(), None);
    assert_eq!(record.group(), Some(&GroupId::new("topics")));
    assert!(!record.has_been_changed());
}

#[tokio::test]
async fn create_twice_fails() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    record.create("topics").await.unwrap();
    let err = record.create("topics").await.unwrap_err();
    assert!(err.is_state());
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    record.create("topics").await.unwrap();

    record.set_field("status", "Done").unwrap();
    record.set_field("done", true).unwrap();
    assert_eq!(record.changed_fields(), vec!["status", "done"]);

    let mut expected = ColumnValues::new();
    expected.insert(&ColumnId::new("status"), json!({"label": "Done"}));
    expected.insert(&ColumnId::new("check"), json!({"checked": "true"}));
    assert_eq!(record.update_payload(), expected);

    record.update().await.unwrap();
    assert_eq!(
        last_call(&service),
        ServiceCall::UpdateItem {
            board: BOARD,
            item: record.id().unwrap(),
            columns: expected,
        }
    );
    assert!(!record.has_been_changed());
}

#[tokio::test]
async fn update_includes_pending_name() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    record.create("topics").await.unwrap();

    record.set_name("Renamed");
    assert!(record.has_been_changed());
    assert_eq!(record.update_payload().name(), Some("Renamed"));

    record.update().await.unwrap();
    assert_eq!(record.name(), Some("Renamed"));
    assert_eq!(record.pending_name(), None);
    let stored = service.item(record.id().unwrap()).unwrap();
    assert_eq!(stored.name.as_deref(), Some("Renamed"));
}

#[tokio::test]
async fn unchanged_update_is_a_no_op() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    record.create("topics").await.unwrap();
    service.clear_calls();

    record.update().await.unwrap();
    assert_eq!(service.call_count(), 0);

    record.set_field("notes", "x").unwrap();
    record.set_field("notes", None::<String>).unwrap();
    record.update().await.unwrap();
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn update_without_id_fails() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    record.set_field("done", true).unwrap();
    assert!(record.update().await.unwrap_err().is_state());
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn failed_update_keeps_changes() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    record.create("topics").await.unwrap();
    record.set_field("done", true).unwrap();

    service.fail_next(vec![json!({"message": "Internal server error"})]);
    let err = record.update().await.unwrap_err();
    assert!(err.is_remote());
    assert!(err.to_string().contains("Internal server error"));
    assert_eq!(record.changed_fields(), vec!["done"]);
}

#[tokio::test]
async fn unbound_fields_are_never_sent() {
    let service = mock();
    let schema = RecordSchema::builder("Task")
        .field_kind("status", FieldKind::Status)
        .field("local_only", TextField::new("kept locally"))
        .build()
        .unwrap();
    let schema = bind(schema, &service);
    let mut record = Record::builder(&schema).set("status", "Done").build().unwrap();
    let payload = record.create_payload();
    assert_eq!(payload.len(), 1);
    assert!(payload.contains("status"));
    record.create("topics").await.unwrap();
}

// ── Delete ───────────────────────────────────────────────────────

#[tokio::test]
async fn delete_clears_id() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::new(&schema, vec![]).unwrap();
    let id = record.create("topics").await.unwrap();
    record.set_name("pending");

    record.delete().await.unwrap();
    assert_eq!(record.id(), None);
    assert_eq!(record.pending_name(), None);
    assert!(service.item(id).is_none());
    assert_eq!(last_call(&service), ServiceCall::DeleteItem { item: id });

    assert!(record.delete().await.unwrap_err().is_state());
    assert!(record.update().await.unwrap_err().is_state());
    assert!(record.duplicate().await.unwrap_err().is_state());
}

// ── Duplicate ────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_requires_id() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let record = Record::new(&schema, vec![]).unwrap();
    let err = record.duplicate().await.unwrap_err();
    assert!(err.is_state());
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn duplicate_creates_a_new_item() {
    let service = mock();
    let schema = bind(task_schema(), &service);
    let mut record = Record::builder(&schema).name("Original").build().unwrap();
    record.set_field("notes", "copy me").unwrap();
    let id = record.create("done").await.unwrap();

    let copy = record.duplicate().await.unwrap();
    assert_ne!(copy.id(), Some(id));
    assert!(copy.id().is_some());
    assert_eq!(copy, record);
    assert_eq!(copy.group(), Some(&GroupId::new("done")));
    assert_eq!(copy.name(), Some("Original"));
    assert_eq!(service.items().len(), 2);
}

// ── From wire ────────────────────────────────────────────────────

fn wire_item() -> WireItem {
    WireItem {
        id: ItemId::new(5),
        name: Some("From the board".into()),
        group: WireGroup {
            id: GroupId::new("topics"),
        },
        column_values: vec![
            WireColumnValue::encoded("status", &json!({"label": "Stuck", "index": 2})),
            WireColumnValue::encoded("date4", &json!({"date": "2021-03-04"})),
            WireColumnValue::empty("text0"),
            WireColumnValue::encoded("unknown", &json!({"x": 1})),
            WireColumnValue::empty("mirror").with_text("Dana"),
        ],
    }
}

fn wire_schema() -> RecordSchema {
    RecordSchema::builder("Task")
        .field_kind("status", FieldKind::Status)
        .field_kind("due_date", FieldKind::Date)
        .field("notes", TextField::new("default notes"))
        .field("done", CheckboxField::new(true))
        .field_kind("owner", FieldKind::Mirror)
        .build()
        .unwrap()
}

#[test]
fn from_wire_decodes_bound_columns() {
    let service = mock();
    let schema = bind(wire_schema(), &service);
    let record = Record::from_wire(&schema, &wire_item()).unwrap();

    assert_eq!(record.id(), Some(ItemId::new(5)));
    assert_eq!(record.name(), Some("From the board"));
    assert_eq!(record.group(), Some(&GroupId::new("topics")));
    assert_eq!(
        record.value("status"),
        Some(FieldValue::Status(StatusValue::label("Stuck")))
    );
    let due = NaiveDate::from_ymd_opt(2021, 3, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(record.value("due_date"), Some(FieldValue::DateTime(due)));
    assert_eq!(record.value("notes"), Some(FieldValue::Null));
    assert_eq!(record.value("owner"), Some(FieldValue::from("Dana")));
    assert!(!record.has_been_changed());
}

#[test]
fn from_wire_keeps_defaults_for_missing_columns() {
    let service = mock();
    let schema = bind(wire_schema(), &service);
    let record = Record::from_wire(&schema, &wire_item()).unwrap();
    assert_eq!(record.value("done"), Some(FieldValue::Bool(true)));
    assert!(record.changed_fields().is_empty());
}

#[test]
fn from_wire_rejects_invalid_json() {
    let service = mock();
    let schema = bind(wire_schema(), &service);
    let mut item = wire_item();
    item.column_values[0].value = Some("{not json".into());
    assert!(Record::from_wire(&schema, &item).is_err());
}

#[tokio::test]
async fn fetched_record_updates_only_what_changed() {
    let service = mock();
    service.add_item(wire_item());
    let schema = bind(wire_schema(), &service);
    let mut record = Record::from_wire(&schema, &wire_item()).unwrap();

    record.set_field("status", "Done").unwrap();
    record.update().await.unwrap();

    let mut expected = ColumnValues::new();
    expected.insert(&ColumnId::new("status"), json!({"label": "Done"}));
    assert_eq!(
        last_call(&service),
        ServiceCall::UpdateItem {
            board: BOARD,
            item: ItemId::new(5),
            columns: expected,
        }
    );
}

// ── Coordinates and precision ────────────────────────────────────

fn site_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("location", "Place", "location"),
        ColumnDef::new("numbers", "Amount", "numeric"),
    ]
}

fn site_schema(service: &Arc<MockBoardService>) -> Arc<BoundSchema> {
    let schema = RecordSchema::builder("Site")
        .field_kind("place", FieldKind::Location)
        .field_kind("amount", FieldKind::Number)
        .build()
        .unwrap();
    Arc::new(
        bind_columns(schema, BOARD, service.clone(), &site_columns(), &BindOptions::default())
            .unwrap(),
    )
}

#[tokio::test]
async fn non_finite_coordinates_never_reach_the_record() {
    let service = Arc::new(MockBoardService::new(BOARD, site_columns()));
    let schema = site_schema(&service);
    let mut record = Record::new(&schema, vec![]).unwrap();

    let err = record
        .set_field("place", Location::new("Tel Aviv", f64::NAN, 34.7))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(!record.has_been_changed());

    record
        .set_field("place", Location::new("Tel Aviv", 32.08, 34.78))
        .unwrap();
    record.create("topics").await.unwrap();
    assert!(!record.has_been_changed());

    service.clear_calls();
    record.update().await.unwrap();
    record.update().await.unwrap();
    assert_eq!(service.call_count(), 0);
}

#[test]
fn non_finite_coordinates_on_the_wire_are_rejected() {
    let service = Arc::new(MockBoardService::new(BOARD, site_columns()));
    let schema = site_schema(&service);
    let item = WireItem {
        id: ItemId::new(9),
        name: None,
        group: WireGroup {
            id: GroupId::new("topics"),
        },
        column_values: vec![WireColumnValue::encoded(
            "location",
            &json!({"address": "Tel Aviv", "lat": "NaN", "lng": 34.7}),
        )],
    };
    let err = Record::from_wire(&schema, &item).unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn high_precision_number_survives_the_round_trip() {
    let service = Arc::new(MockBoardService::new(BOARD, site_columns()));
    let schema = site_schema(&service);
    let amount = serde_json::Number::from_f64(-514259375.24179316).unwrap();

    let mut record = Record::new(&schema, vec![]).unwrap();
    record.set_field("amount", amount.clone()).unwrap();
    let id = record.create("topics").await.unwrap();
    assert!(!record.has_been_changed());

    let ServiceCall::CreateItem { columns, .. } = last_call(&service) else {
        panic!("expected a create call");
    };
    assert_eq!(
        columns.get(&ColumnId::new("numbers")),
        Some(&json!(amount.to_string()))
    );

    let fetched = Record::from_wire(&schema, &service.item(id).unwrap()).unwrap();
    assert_eq!(fetched.value("amount"), Some(FieldValue::Number(amount)));
    assert!(!fetched.has_been_changed());
    assert_eq!(fetched, record);
}

// ── Display / equality ───────────────────────────────────────────

#[test]
fn display_lists_fields_with_columns() {
    let service = mock();
    let schema = bind(wire_schema(), &service);
    let record = Record::from_wire(&schema, &wire_item()).unwrap();
    let text = record.to_string();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Task (Id: 5 | Name: From the board | Group Id: topics):")
    );
    let status = lines.next().unwrap();
    assert!(status.starts_with("\tstatus <status>: "));
    assert!(status.ends_with("color(label: Stuck)"));
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn equality_compares_values_only() {
    let service = mock();
    let schema = bind(wire_schema(), &service);
    let fetched = Record::from_wire(&schema, &wire_item()).unwrap();
    let mut built = Record::new(&schema, vec![]).unwrap();
    built.set_field("status", "Stuck").unwrap();
    built
        .set_field(
            "due_date",
            NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
        )
        .unwrap();
    built.set_field("notes", None::<String>).unwrap();
    built.replace_field("owner", Field::from(boardlink_fields::MirrorField::new())).unwrap();
    built
        .modify_field("owner", |f| f.decode(Some(&json!("Dana"))))
        .unwrap();
    assert_eq!(fetched, built);
    assert_ne!(fetched.id(), built.id());
}
