//! User identity management.
//!
//! This module owns the user records behind the login flow: upsert-at-login
//! keyed on the external `open_id`, point lookups for session resolution,
//! role assignment (including the configured owner identity), and the
//! `me`/`logout` auth surface. The module follows hexagonal architecture:
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
