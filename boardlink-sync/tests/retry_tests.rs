use boardlink_fields::FieldKind;
use boardlink_model::{BindOptions, Record, RecordSchema};
use boardlink_sync::{bind_schema, retry_when_rate_limited, RetryPolicy, SyncEngine};
use boardlink_types::mock::MockBoardService;
use boardlink_types::{BoardId, BoardService, ColumnDef, RemoteError};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn budget_exhausted(seconds: u64) -> RemoteError {
    RemoteError::message(format!(
        "Complexity budget exhausted, query cost 30001 budget remaining 1 out of 1000000 reset in {seconds} seconds"
    ))
}

// ── Plain operations ─────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn waits_the_advertised_time_then_succeeds() {
    let attempts = &AtomicUsize::new(0);
    let start = Instant::now();

    let result = retry_when_rate_limited(&RetryPolicy::default(), || async move {
        if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
            Err(budget_exhausted(3))
        } else {
            Ok("done")
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(start.elapsed() >= Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn falls_back_when_no_wait_is_given() {
    let attempts = &AtomicUsize::new(0);
    let start = Instant::now();
    let policy = RetryPolicy {
        max_attempts: 3,
        fallback_delay_ms: 250,
    };

    let result = retry_when_rate_limited(&policy, || async move {
        if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(RemoteError::message("Complexity budget exhausted"))
        } else {
            Ok(())
        }
    })
    .await;

    assert!(result.is_ok());
    assert!(start.elapsed() >= Duration::from_millis(250));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn other_errors_are_not_retried() {
    let attempts = &AtomicUsize::new(0);

    let result: Result<(), RemoteError> = retry_when_rate_limited(&RetryPolicy::default(), || async move {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(RemoteError::message("Item 12 not found"))
    })
    .await;

    assert!(!result.unwrap_err().is_rate_limited());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_attempts() {
    let attempts = &AtomicUsize::new(0);
    let policy = RetryPolicy {
        max_attempts: 3,
        ..RetryPolicy::default()
    };

    let result: Result<(), RemoteError> = retry_when_rate_limited(&policy, || async move {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(budget_exhausted(1))
    })
    .await;

    assert!(result.unwrap_err().is_rate_limited());
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

// ── Board operations ─────────────────────────────────────────────

const BOARD: BoardId = BoardId::new(9);

#[tokio::test(start_paused = true)]
async fn retries_a_rate_limited_fetch() {
    let service = Arc::new(
        MockBoardService::new(BOARD, vec![ColumnDef::new("text0", "Notes", "text")])
            .with_groups(["topics"]),
    );
    let schema = RecordSchema::builder("Note")
        .field_kind("notes", FieldKind::Text)
        .build()
        .unwrap();
    let dyn_service: Arc<dyn BoardService> = service.clone();
    let schema = bind_schema(schema, BOARD, dyn_service, BindOptions::default())
        .await
        .unwrap();
    let engine = SyncEngine::new(schema);

    service.fail_next(vec![json!({
        "message": "Complexity budget exhausted, query cost 10 budget remaining 0 reset in 2 seconds"
    })]);
    let groups = retry_when_rate_limited(&RetryPolicy::default(), || engine.fetch_group_ids())
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(service.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn retries_a_rate_limited_duplicate() {
    let service = Arc::new(MockBoardService::new(
        BOARD,
        vec![ColumnDef::new("text0", "Notes", "text")],
    ));
    let schema = RecordSchema::builder("Note")
        .field_kind("notes", FieldKind::Text)
        .build()
        .unwrap();
    let dyn_service: Arc<dyn BoardService> = service.clone();
    let schema = bind_schema(schema, BOARD, dyn_service, BindOptions::default())
        .await
        .unwrap();

    let mut record = Record::builder(&schema)
        .name("original")
        .set("notes", "hello")
        .build()
        .unwrap();
    record.create("topics").await.unwrap();

    service.fail_next(vec![json!({"message": "Complexity budget exhausted, reset in 1 seconds"})]);
    let copy = retry_when_rate_limited(&RetryPolicy::default(), || record.duplicate())
        .await
        .unwrap();

    assert_ne!(copy.id(), record.id());
    assert_eq!(copy.value("notes"), record.value("notes"));
    assert_eq!(service.items().len(), 2);
}
