//! Port contracts for user identity management.
//!
//! Ports define infrastructure-agnostic interfaces used by identity
//! services.

pub mod repository;
pub mod session;

pub use repository::UserRepository;
pub use session::{SessionStore, SessionToken};
