//! `PostgreSQL` repository implementations for tasks and the audit log.

use super::{
    models::{AuditLogRow, NewAuditLogRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{task_audit_logs, tasks},
};
use crate::db::{Database, StoreError, StoreResult};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        AuditAction, AuditEntry, AuditEntryId, NewAuditEntry, NewTask, Task, TaskFilter, TaskId,
        TaskPatch, TaskPriority, TaskRecord, TaskStatistics, TaskStatus, TaskTitle,
    },
    ports::{AuditLogRepository, TaskRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;

/// Checks out a pooled connection on the blocking pool and runs `f` on it.
async fn run_blocking<F, T>(db: &Database, f: F) -> StoreResult<T>
where
    F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let Some(pool) = db.pool() else {
        return Err(StoreError::Unavailable);
    };
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(StoreError::backend)?;
        f(&mut connection)
    })
    .await
    .map_err(StoreError::backend)?
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    db: Arc<Database>,
}

impl PostgresTaskRepository {
    /// Creates a new repository over the shared store handle.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; task listing is empty");
            return Ok(Vec::new());
        }
        run_blocking(&self.db, move |connection| {
            let rows = filtered_query(filter)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(StoreError::backend)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; task lookup returns nothing");
            return Ok(None);
        }
        run_blocking(&self.db, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn create(&self, task: &NewTask) -> StoreResult<TaskId> {
        let new_row = NewTaskRow {
            title: task.title.as_str().to_owned(),
            description: task.description.clone(),
            status: task.status.as_str().to_owned(),
            priority: task.priority.as_str().to_owned(),
            created_by: task.created_by.into_inner(),
            assigned_to: task.assigned_to.map(UserId::into_inner),
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        };
        run_blocking(&self.db, move |connection| {
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i32>(connection)
                .map_err(StoreError::backend)?;
            Ok(TaskId::new(id))
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let changeset = TaskChangeset {
            title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
            description: patch.description.clone(),
            status: patch.status.map(|status| status.as_str().to_owned()),
            priority: patch.priority.map(|priority| priority.as_str().to_owned()),
            assigned_to: patch.assigned_to.map(UserId::into_inner),
            due_date: patch.due_date,
            updated_at,
        };
        run_blocking(&self.db, move |connection| {
            diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(StoreError::backend)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> StoreResult<()> {
        run_blocking(&self.db, move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(StoreError::backend)?;
            Ok(())
        })
        .await
    }

    async fn statistics(&self, scope: Option<UserId>) -> StoreResult<TaskStatistics> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; statistics are zero");
            return Ok(TaskStatistics::default());
        }
        run_blocking(&self.db, move |connection| {
            // Full-table scan with in-memory filtering, shared with the
            // memory adapter so the counts never diverge.
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(StoreError::backend)?;
            let all: Vec<Task> = rows
                .into_iter()
                .map(row_to_task)
                .collect::<StoreResult<_>>()?;
            Ok(TaskStatistics::from_tasks(&all, scope))
        })
        .await
    }
}

fn filtered_query(filter: TaskFilter) -> tasks::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = tasks::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(tasks::priority.eq(priority.as_str()));
    }
    if let Some(assigned_to) = filter.assigned_to {
        query = query.filter(tasks::assigned_to.eq(assigned_to.into_inner()));
    }
    if let Some(created_by) = filter.created_by {
        query = query.filter(tasks::created_by.eq(created_by.into_inner()));
    }
    query
}

fn row_to_task(row: TaskRow) -> StoreResult<Task> {
    let title = TaskTitle::new(row.title).map_err(StoreError::backend)?;
    let status = TaskStatus::try_from(row.status.as_str()).map_err(StoreError::backend)?;
    let priority = TaskPriority::try_from(row.priority.as_str()).map_err(StoreError::backend)?;
    Ok(Task::from_record(TaskRecord {
        id: TaskId::new(row.id),
        title,
        description: row.description,
        status,
        priority,
        created_by: UserId::new(row.created_by),
        assigned_to: row.assigned_to.map(UserId::new),
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// `PostgreSQL`-backed audit-log repository.
#[derive(Debug, Clone)]
pub struct PostgresAuditLogRepository {
    db: Arc<Database>,
}

impl PostgresAuditLogRepository {
    /// Creates a new repository over the shared store handle.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn append(&self, entry: &NewAuditEntry) -> StoreResult<()> {
        let new_row = NewAuditLogRow {
            task_id: entry.task_id.into_inner(),
            user_id: entry.user_id.into_inner(),
            action: entry.action.as_str().to_owned(),
            old_value: entry.old_value.clone(),
            new_value: entry.new_value.clone(),
            created_at: entry.created_at,
        };
        run_blocking(&self.db, move |connection| {
            diesel::insert_into(task_audit_logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(StoreError::backend)?;
            Ok(())
        })
        .await
    }

    async fn for_task(&self, task_id: TaskId) -> StoreResult<Vec<AuditEntry>> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; audit history is empty");
            return Ok(Vec::new());
        }
        run_blocking(&self.db, move |connection| {
            let rows = task_audit_logs::table
                .filter(task_audit_logs::task_id.eq(task_id.into_inner()))
                .order(task_audit_logs::id.asc())
                .select(AuditLogRow::as_select())
                .load::<AuditLogRow>(connection)
                .map_err(StoreError::backend)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn row_to_entry(row: AuditLogRow) -> StoreResult<AuditEntry> {
    let action = AuditAction::try_from(row.action.as_str()).map_err(StoreError::backend)?;
    Ok(AuditEntry {
        id: AuditEntryId::new(row.id),
        task_id: TaskId::new(row.task_id),
        user_id: UserId::new(row.user_id),
        action,
        old_value: row.old_value,
        new_value: row.new_value,
        created_at: row.created_at,
    })
}
