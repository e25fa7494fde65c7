//! Domain model for task management.
//!
//! The task domain models the task record itself, the structured listing
//! filter, the audit trail entries, the authorization policy, and the
//! statistics derivation, keeping all infrastructure concerns outside of
//! the domain boundary.

mod audit;
mod error;
mod ids;
pub mod policy;
mod stats;
mod task;

pub use audit::{AuditAction, AuditEntry, AuditEntryId, NewAuditEntry};
pub use error::{
    ParseAuditActionError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::TaskId;
pub use stats::TaskStatistics;
pub use task::{NewTask, Task, TaskFilter, TaskPatch, TaskPriority, TaskRecord, TaskStatus, TaskTitle};
