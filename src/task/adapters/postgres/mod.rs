//! `PostgreSQL` adapters for task and audit-log persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresAuditLogRepository, PostgresTaskRepository};
