//! Dashboard statistics derived from the full task set.

use super::{Task, TaskStatus};
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// Aggregate task counts for the dashboard.
///
/// `total` is the cardinality of the scoped set; the per-status counts are
/// exact status matches. Should additional statuses ever exist in the
/// store, `total` exceeds their sum rather than tracking it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// Number of tasks in the scoped set.
    pub total: u64,
    /// Tasks with status `todo`.
    pub todo: u64,
    /// Tasks with status `in-progress`.
    pub in_progress: u64,
    /// Tasks with status `completed`.
    pub completed: u64,
}

impl TaskStatistics {
    /// Derives counts from the full task set, optionally scoped to tasks
    /// where the given user is creator or assignee.
    ///
    /// This is a deliberate full scan with in-memory filtering; both store
    /// adapters share it so the counts never diverge.
    #[must_use]
    pub fn from_tasks<'a, I>(tasks: I, scope: Option<UserId>) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut stats = Self::default();
        for task in tasks {
            if let Some(user) = scope
                && task.created_by() != user
                && task.assigned_to() != Some(user)
            {
                continue;
            }
            stats.total += 1;
            match task.status() {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
        }
        stats
    }
}
