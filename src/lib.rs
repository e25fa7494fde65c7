//! Taskdeck: task-tracking application core.
//!
//! This crate provides the data layer and access-control rules behind a
//! task-tracking application: task CRUD with audit-log side effects,
//! authorization policy, dashboard statistics, and the user upsert path
//! backing the login flow. Page rendering, routing, and session-cookie
//! plumbing live in an external transport that calls into this core through
//! the service types exposed here.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`db`]: Shared store handle and error taxonomy
//! - [`identity`]: Users, roles, login upsert, and sessions
//! - [`task`]: Task CRUD, authorization policy, audit trail, statistics

pub mod db;
pub mod identity;
pub mod task;
