//! Diesel row models for task persistence.

use super::schema::{task_audit_logs, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned surrogate identifier.
    pub id: i32,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Creator.
    pub created_by: i32,
    /// Assignee, if any.
    pub assigned_to: Option<i32>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Creator.
    pub created_by: i32,
    /// Assignee, if any.
    pub assigned_to: Option<i32>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial-update changeset for task records.
///
/// `None` fields are skipped; `updated_at` is always applied, which also
/// keeps the changeset non-empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement status, if any.
    pub status: Option<String>,
    /// Replacement priority, if any.
    pub priority: Option<String>,
    /// Replacement assignee, if any.
    pub assigned_to: Option<i32>,
    /// Replacement due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Update timestamp, always refreshed.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for audit-log entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_audit_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditLogRow {
    /// Store-assigned surrogate identifier.
    pub id: i32,
    /// Task the entry records a mutation of.
    pub task_id: i32,
    /// Acting user.
    pub user_id: i32,
    /// Kind of mutation.
    pub action: String,
    /// Serialized pre-change snapshot.
    pub old_value: Option<String>,
    /// Serialized submitted-change snapshot.
    pub new_value: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for audit-log entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_audit_logs)]
pub struct NewAuditLogRow {
    /// Task the entry records a mutation of.
    pub task_id: i32,
    /// Acting user.
    pub user_id: i32,
    /// Kind of mutation.
    pub action: String,
    /// Serialized pre-change snapshot.
    pub old_value: Option<String>,
    /// Serialized submitted-change snapshot.
    pub new_value: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
