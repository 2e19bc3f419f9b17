//! Tests for the in-memory completion log contract.

use crate::identity::domain::EmailAddress;
use crate::task::{
    adapters::memory::InMemoryCompletionLog,
    domain::{CompletionId, CompletionRecord, PersistedCompletionData, TaskId},
    ports::{CompletionLog, CompletionLogError},
};
use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

fn timestamp(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn record_at(task_id: TaskId, hour: u32) -> CompletionRecord {
    CompletionRecord::from_persisted(PersistedCompletionData {
        id: CompletionId::new(),
        task_id,
        task_name: "Refill paper".to_owned(),
        completed_by: EmailAddress::new("w@x.com").expect("valid email"),
        completed_at: timestamp(hour),
        checked_items: vec!["open tray".to_owned()],
        evidence: None,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_for_task_orders_by_completion_time_ascending() {
    let log = InMemoryCompletionLog::new();
    let task_id = TaskId::new();

    // Appended out of chronological order on purpose.
    for hour in [15, 9, 12] {
        log.append(&record_at(task_id, hour))
            .await
            .expect("append succeeds");
    }

    let entries = log.list_for_task(task_id).await.expect("list succeeds");
    let hours: Vec<_> = entries
        .iter()
        .map(|record| record.completed_at())
        .collect();
    assert_eq!(hours, vec![timestamp(9), timestamp(12), timestamp(15)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_for_task_excludes_other_tasks(#[values(0, 3)] other_entries: usize) {
    let log = InMemoryCompletionLog::new();
    let task_id = TaskId::new();
    let other_task = TaskId::new();

    log.append(&record_at(task_id, 10))
        .await
        .expect("append succeeds");
    for hour in 0..other_entries {
        log.append(&record_at(
            other_task,
            u32::try_from(hour).expect("small hour"),
        ))
        .await
        .expect("append succeeds");
    }

    let entries = log.list_for_task(task_id).await.expect("list succeeds");
    assert_eq!(entries.len(), 1);
    assert!(entries.iter().all(|record| record.task_id() == task_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_rejects_duplicate_record_ids() {
    let log = InMemoryCompletionLog::new();
    let record = record_at(TaskId::new(), 10);

    log.append(&record).await.expect("first append succeeds");
    let result = log.append(&record).await;

    assert!(matches!(
        result,
        Err(CompletionLogError::DuplicateRecord(id)) if id == record.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn earlier_entries_are_unchanged_by_later_appends() {
    let log = InMemoryCompletionLog::new();
    let task_id = TaskId::new();

    let first = record_at(task_id, 9);
    log.append(&first).await.expect("append succeeds");
    let before = log.list_for_task(task_id).await.expect("list succeeds");

    log.append(&record_at(task_id, 10))
        .await
        .expect("append succeeds");
    let after = log.list_for_task(task_id).await.expect("list succeeds");

    assert_eq!(after.len(), 2);
    assert_eq!(after.first(), before.first());
}
