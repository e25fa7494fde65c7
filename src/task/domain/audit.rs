//! Audit-log entry types recording task mutations.
//!
//! Entries are append-only: one row per mutation, carrying the actor, the
//! action kind, and serialized before/after snapshots of the relevant task
//! state. Nothing in this core ever mutates or deletes an entry.

use super::{ParseAuditActionError, TaskId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate identifier for an audit-log entry, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEntryId(i32);

impl AuditEntryId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of mutation an audit entry records.
///
/// The task service emits only `Created`, `Updated`, and `Deleted`; the
/// remaining kinds are part of the persisted vocabulary for future use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A task was created.
    Created,
    /// A task's fields were updated.
    Updated,
    /// A task was deleted.
    Deleted,
    /// A task's status changed.
    StatusChanged,
    /// A task was assigned.
    Assigned,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
            Self::Assigned => "assigned",
        }
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "deleted" => Ok(Self::Deleted),
            "status_changed" => Ok(Self::StatusChanged),
            "assigned" => Ok(Self::Assigned),
            _ => Err(ParseAuditActionError(value.to_owned())),
        }
    }
}

/// Insert record for an audit-log entry.
///
/// `created_at` is stamped by the emitting service from its injected clock,
/// never by the adapters, so entries stay deterministic under a mocked
/// clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    /// Task the entry records a mutation of.
    pub task_id: TaskId,
    /// Acting user.
    pub user_id: UserId,
    /// Kind of mutation.
    pub action: AuditAction,
    /// Serialized snapshot of the task state before the change, if any.
    pub old_value: Option<String>,
    /// Serialized snapshot of the submitted change, if any.
    pub new_value: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewAuditEntry {
    /// Creates an entry with no snapshots.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        user_id: UserId,
        action: AuditAction,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            user_id,
            action,
            old_value: None,
            new_value: None,
            created_at,
        }
    }

    /// Attaches the pre-change snapshot.
    #[must_use]
    pub fn with_old_value(mut self, value: impl Into<String>) -> Self {
        self.old_value = Some(value.into());
        self
    }

    /// Attaches the submitted-change snapshot.
    #[must_use]
    pub fn with_new_value(mut self, value: impl Into<String>) -> Self {
        self.new_value = Some(value.into());
        self
    }
}

/// Audit-log entry as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Store-assigned surrogate identifier.
    pub id: AuditEntryId,
    /// Task the entry records a mutation of.
    pub task_id: TaskId,
    /// Acting user.
    pub user_id: UserId,
    /// Kind of mutation.
    pub action: AuditAction,
    /// Serialized snapshot of the task state before the change, if any.
    pub old_value: Option<String>,
    /// Serialized snapshot of the submitted change, if any.
    pub new_value: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
