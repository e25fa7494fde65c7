//! Repository ports for task and audit-log persistence.

use crate::db::StoreResult;
use crate::identity::domain::UserId;
use crate::task::domain::{
    AuditEntry, NewAuditEntry, NewTask, Task, TaskFilter, TaskId, TaskPatch, TaskStatistics,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Task persistence contract.
///
/// Reads degrade to empty results when no store is configured; writes fail
/// with [`crate::db::StoreError::Unavailable`]. Store-level failures
/// propagate unchanged.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns all tasks matching the filter's conjunction of constraints,
    /// in store order.
    async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Stores a new task, returning the store-assigned identifier so the
    /// caller can write a correlated audit-log entry.
    async fn create(&self, task: &NewTask) -> StoreResult<TaskId>;

    /// Applies a partial field update to an existing task.
    ///
    /// Updating a task that no longer exists is not an error: concurrent
    /// writers are last-writer-wins with no detection.
    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Deletes a task. Deleting a task that no longer exists is not an
    /// error.
    async fn delete(&self, id: TaskId) -> StoreResult<()>;

    /// Derives aggregate counts over the full task set, optionally scoped
    /// to tasks where the given user is creator or assignee.
    async fn statistics(&self, scope: Option<UserId>) -> StoreResult<TaskStatistics>;
}

/// Append-only audit-log persistence contract.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Appends an entry. Pure insert; entries are never read back before
    /// writing.
    async fn append(&self, entry: &NewAuditEntry) -> StoreResult<()>;

    /// Returns all entries recorded for a task, in store order.
    async fn for_task(&self, task_id: TaskId) -> StoreResult<Vec<AuditEntry>>;
}
