//! Task boundary service: validation, authorization, persistence, and the
//! audit-log side effect of every mutation.
//!
//! Ordering guarantees honoured here: validation happens before any store
//! access, existence is checked before permission (NOT_FOUND takes
//! precedence over FORBIDDEN), and the delete audit entry is written before
//! the row is physically removed so its snapshot is never empty.

use crate::db::StoreError;
use crate::identity::{
    domain::{Actor, User, UserId},
    ports::UserRepository,
};
use crate::task::{
    domain::{
        AuditAction, AuditEntry, NewAuditEntry, NewTask, Task, TaskDomainError, TaskFilter,
        TaskId, TaskPatch, TaskPriority, TaskStatistics, TaskStatus, TaskTitle, policy,
    },
    ports::{AuditLogRepository, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// The caller cannot supply `status` or `created_by`: creation always
/// starts at `todo` and the creator is always the authenticated caller.
/// Serializes to the `new_value` snapshot of the `created` audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTaskRequest {
    /// Task title, validated to 1–255 characters.
    pub title: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority; defaults to [`TaskPriority::Medium`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Due date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Assignee, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            assigned_to: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assigned_to(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }
}

/// Request payload for partially updating a task.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement status, if any.
    pub status: Option<TaskStatus>,
    /// Replacement priority, if any.
    pub priority: Option<TaskPriority>,
    /// Replacement due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement assignee, if any.
    pub assigned_to: Option<UserId>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the replacement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the replacement assignee.
    #[must_use]
    pub const fn with_assigned_to(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Validates the request into a patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when a supplied title violates the
    /// length bounds.
    pub fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        Ok(TaskPatch {
            title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
        })
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// A mutation was attempted without an authenticated caller.
    #[error("caller is not authenticated")]
    Unauthenticated,

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller lacks read or write permission for the task.
    #[error("caller lacks permission for task {0}")]
    Forbidden(TaskId),

    /// Input violated a structural constraint.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The store was unavailable or rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task boundary service.
#[derive(Clone)]
pub struct TaskService<T, A, U, C>
where
    T: TaskRepository,
    A: AuditLogRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    audit: Arc<A>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, A, U, C> TaskService<T, A, U, C>
where
    T: TaskRepository,
    A: AuditLogRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, audit: Arc<A>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            audit,
            users,
            clock,
        }
    }

    /// Lists tasks matching the filter, restricted to the caller's read
    /// visibility.
    ///
    /// Admins see every matching task; other callers see only tasks they
    /// created or are assigned to. An absent caller sees an empty list.
    /// Out-of-scope tasks are silently filtered, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the listing fails.
    pub async fn list(
        &self,
        actor: Option<&Actor>,
        filter: TaskFilter,
    ) -> TaskServiceResult<Vec<Task>> {
        let mut tasks = self.tasks.list(filter).await?;
        if !actor.is_some_and(|actor| actor.is_admin()) {
            tasks.retain(|task| policy::can_view(actor, task));
        }
        Ok(tasks)
    }

    /// Returns a single task by identifier.
    ///
    /// Existence is checked before permission: a missing task is
    /// [`TaskServiceError::NotFound`] for every caller, and an existing
    /// task outside the caller's visibility is
    /// [`TaskServiceError::Forbidden`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Forbidden`, or `Store` as described above.
    pub async fn get_by_id(&self, actor: Option<&Actor>, id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if !policy::can_view(actor, &task) {
            return Err(TaskServiceError::Forbidden(id));
        }
        Ok(task)
    }

    /// Creates a task on behalf of the authenticated caller.
    ///
    /// `status` is forced to `todo` and `created_by` to the caller,
    /// regardless of input. On success a `created` audit entry carrying the
    /// submitted fields is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`] without a caller,
    /// [`TaskServiceError::Validation`] for a bad title, or
    /// [`TaskServiceError::Store`] when the write fails.
    pub async fn create(
        &self,
        actor: Option<&Actor>,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<TaskId> {
        let actor = actor.ok_or(TaskServiceError::Unauthenticated)?;
        let title = TaskTitle::new(request.title.clone())?;
        let now = self.clock.utc();
        let new_task = NewTask {
            title,
            description: request.description.clone(),
            status: TaskStatus::Todo,
            priority: request.priority.unwrap_or_default(),
            created_by: actor.id,
            assigned_to: request.assigned_to,
            due_date: request.due_date,
            created_at: now,
            updated_at: now,
        };
        let id = self.tasks.create(&new_task).await?;

        let mut entry = NewAuditEntry::new(id, actor.id, AuditAction::Created, now);
        if let Some(json) = snapshot(&request) {
            entry = entry.with_new_value(json);
        }
        self.record(entry).await;
        Ok(id)
    }

    /// Applies a partial update to a task the caller may modify.
    ///
    /// On success an `updated` audit entry is recorded with the pre-update
    /// snapshot as `old_value` and the submitted fields (not the full
    /// post-update row) as `new_value`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `Validation`, `NotFound`, `Forbidden`,
    /// or `Store`, with validation checked before any store access and
    /// existence before permission.
    pub async fn update(
        &self,
        actor: Option<&Actor>,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<()> {
        let actor = actor.ok_or(TaskServiceError::Unauthenticated)?;
        let patch = request.into_patch()?;
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if !policy::can_modify(Some(actor), &task) {
            return Err(TaskServiceError::Forbidden(id));
        }
        let now = self.clock.utc();
        self.tasks.update(id, &patch, now).await?;

        let mut entry = NewAuditEntry::new(id, actor.id, AuditAction::Updated, now);
        if let Some(json) = snapshot(&task) {
            entry = entry.with_old_value(json);
        }
        if let Some(json) = snapshot(&patch) {
            entry = entry.with_new_value(json);
        }
        self.record(entry).await;
        Ok(())
    }

    /// Deletes a task the caller may modify.
    ///
    /// The `deleted` audit entry, carrying the pre-delete snapshot, is
    /// written before the row is removed so the snapshot is taken from a
    /// live row.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `NotFound`, `Forbidden`, or `Store`,
    /// with existence checked before permission.
    pub async fn delete(&self, actor: Option<&Actor>, id: TaskId) -> TaskServiceResult<()> {
        let actor = actor.ok_or(TaskServiceError::Unauthenticated)?;
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if !policy::can_modify(Some(actor), &task) {
            return Err(TaskServiceError::Forbidden(id));
        }

        let mut entry = NewAuditEntry::new(id, actor.id, AuditAction::Deleted, self.clock.utc());
        if let Some(json) = snapshot(&task) {
            entry = entry.with_old_value(json);
        }
        self.record(entry).await;

        self.tasks.delete(id).await?;
        Ok(())
    }

    /// Returns aggregate task counts, optionally scoped to tasks where the
    /// given user is creator or assignee. The transport passes the caller's
    /// own identifier to scope the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the scan fails.
    pub async fn statistics(&self, scope: Option<UserId>) -> TaskServiceResult<TaskStatistics> {
        Ok(self.tasks.statistics(scope).await?)
    }

    /// Returns the full user list for assignment pickers.
    ///
    /// Deliberately unrestricted, matching the existing product behaviour;
    /// flagged for product review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the listing fails.
    pub async fn users(&self) -> TaskServiceResult<Vec<User>> {
        Ok(self.users.list_all().await?)
    }

    /// Returns the audit trail for a task the caller may see.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Forbidden`, or `Store`, with existence checked
    /// before permission.
    pub async fn history(
        &self,
        actor: Option<&Actor>,
        id: TaskId,
    ) -> TaskServiceResult<Vec<AuditEntry>> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if !policy::can_view(actor, &task) {
            return Err(TaskServiceError::Forbidden(id));
        }
        Ok(self.audit.for_task(id).await?)
    }

    /// Appends an audit entry, best effort.
    ///
    /// No transaction spans a task mutation and its audit write, so a
    /// failed append is logged and the mutation outcome stands.
    async fn record(&self, entry: NewAuditEntry) {
        if let Err(err) = self.audit.append(&entry).await {
            tracing::warn!(
                task_id = %entry.task_id,
                action = entry.action.as_str(),
                error = %err,
                "audit log write failed; mutation already applied",
            );
        }
    }
}

/// Serializes an audit snapshot, degrading to no snapshot on failure.
fn snapshot<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize audit snapshot");
            None
        }
    }
}
