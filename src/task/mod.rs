//! Task management for Taskdeck.
//!
//! This module implements the task CRUD operations, the authorization
//! policy gating who may read or write which task, the audit-log side
//! effects accompanying every mutation, and the dashboard statistics
//! aggregation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
