//! Degraded-store behaviour of the `PostgreSQL` adapters when no database
//! is configured: reads return empty results, writes fail loudly.

use std::sync::Arc;

use crate::db::{Database, StoreError};
use crate::identity::domain::UserId;
use crate::task::{
    adapters::postgres::{PostgresAuditLogRepository, PostgresTaskRepository},
    domain::{
        AuditAction, NewAuditEntry, NewTask, TaskFilter, TaskId, TaskPatch, TaskPriority,
        TaskStatistics, TaskStatus, TaskTitle,
    },
    ports::{AuditLogRepository, TaskRepository},
};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> PostgresTaskRepository {
    PostgresTaskRepository::new(Arc::new(Database::unconfigured()))
}

#[fixture]
fn audit() -> PostgresAuditLogRepository {
    PostgresAuditLogRepository::new(Arc::new(Database::unconfigured()))
}

fn new_task() -> NewTask {
    let at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    NewTask {
        title: TaskTitle::new("Fix bug").expect("valid title"),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        created_by: UserId::new(1),
        assigned_to: None,
        due_date: None,
        created_at: at,
        updated_at: at,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_reads_degrade_to_empty_results(repository: PostgresTaskRepository) {
    let listed = repository
        .list(TaskFilter::none())
        .await
        .expect("listing should succeed");
    assert!(listed.is_empty());

    let found = repository
        .find_by_id(TaskId::new(1))
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());

    let stats = repository
        .statistics(None)
        .await
        .expect("statistics should succeed");
    assert_eq!(stats, TaskStatistics::default());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_writes_fail_with_store_unavailable(repository: PostgresTaskRepository) {
    let created = repository.create(&new_task()).await;
    assert!(matches!(created, Err(StoreError::Unavailable)));

    let at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let updated = repository
        .update(TaskId::new(1), &TaskPatch::default(), at)
        .await;
    assert!(matches!(updated, Err(StoreError::Unavailable)));

    let deleted = repository.delete(TaskId::new(1)).await;
    assert!(matches!(deleted, Err(StoreError::Unavailable)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_history_degrades_to_empty_results(audit: PostgresAuditLogRepository) {
    let entries = audit
        .for_task(TaskId::new(1))
        .await
        .expect("history should succeed");
    assert!(entries.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_appends_fail_with_store_unavailable(audit: PostgresAuditLogRepository) {
    let at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let entry = NewAuditEntry::new(TaskId::new(1), UserId::new(1), AuditAction::Created, at);
    let appended = audit.append(&entry).await;
    assert!(matches!(appended, Err(StoreError::Unavailable)));
}
