//! In-memory task adapters for service tests.

mod task;

pub use task::{InMemoryAuditLogRepository, InMemoryTaskRepository};
