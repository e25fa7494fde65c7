//! Thread-safe in-memory task and audit-log repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::{StoreError, StoreResult};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        AuditEntry, AuditEntryId, NewAuditEntry, NewTask, Task, TaskFilter, TaskId, TaskPatch,
        TaskRecord, TaskStatistics,
    },
    ports::{AuditLogRepository, TaskRepository},
};

/// In-memory task repository with store-style surrogate id assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    next_id: i32,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::backend(std::io::Error::other(err.to_string()))
}

fn merge_patch(task: &Task, patch: &TaskPatch, updated_at: DateTime<Utc>) -> Task {
    Task::from_record(TaskRecord {
        id: task.id(),
        title: patch.title.clone().unwrap_or_else(|| task.title().clone()),
        description: patch
            .description
            .clone()
            .or_else(|| task.description().map(str::to_owned)),
        status: patch.status.unwrap_or(task.status()),
        priority: patch.priority.unwrap_or(task.priority()),
        created_by: task.created_by(),
        assigned_to: patch.assigned_to.or(task.assigned_to()),
        due_date: patch.due_date.or(task.due_date()),
        created_at: task.created_at(),
        updated_at,
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.id().into_inner());
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create(&self, task: &NewTask) -> StoreResult<TaskId> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.next_id += 1;
        let id = TaskId::new(state.next_id);
        let stored = Task::from_record(TaskRecord {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            created_by: task.created_by,
            assigned_to: task.assigned_to,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        });
        state.tasks.insert(id, stored);
        Ok(id)
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(existing) = state.tasks.get(&id) {
            let merged = merge_patch(existing, patch, updated_at);
            state.tasks.insert(id, merged);
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> StoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tasks.remove(&id);
        Ok(())
    }

    async fn statistics(&self, scope: Option<UserId>) -> StoreResult<TaskStatistics> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(TaskStatistics::from_tasks(state.tasks.values(), scope))
    }
}

/// In-memory append-only audit-log repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLogRepository {
    state: Arc<RwLock<InMemoryAuditState>>,
}

#[derive(Debug, Default)]
struct InMemoryAuditState {
    entries: Vec<AuditEntry>,
    next_id: i32,
}

impl InMemoryAuditLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every entry recorded so far, in append order.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the state lock is poisoned.
    pub fn all(&self) -> StoreResult<Vec<AuditEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.entries.clone())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, entry: &NewAuditEntry) -> StoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.next_id += 1;
        let stored = AuditEntry {
            id: AuditEntryId::new(state.next_id),
            task_id: entry.task_id,
            user_id: entry.user_id,
            action: entry.action,
            old_value: entry.old_value.clone(),
            new_value: entry.new_value.clone(),
            created_at: entry.created_at,
        };
        state.entries.push(stored);
        Ok(())
    }

    async fn for_task(&self, task_id: TaskId) -> StoreResult<Vec<AuditEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .entries
            .iter()
            .filter(|entry| entry.task_id == task_id)
            .cloned()
            .collect())
    }
}
