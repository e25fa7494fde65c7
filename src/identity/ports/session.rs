//! Session artifact port backing the auth surface.
//!
//! The transport owns cookie plumbing; this port only resolves and
//! invalidates the opaque session artifact the transport carries.

use crate::db::StoreResult;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session artifact issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an opaque session value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session persistence contract.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Records a session for the given user.
    async fn insert(&self, token: SessionToken, user: UserId) -> StoreResult<()>;

    /// Resolves a session to the user it belongs to.
    ///
    /// Returns `None` for unknown or invalidated sessions.
    async fn resolve(&self, token: &SessionToken) -> StoreResult<Option<UserId>>;

    /// Invalidates a session. Invalidating an unknown session is not an
    /// error.
    async fn invalidate(&self, token: &SessionToken) -> StoreResult<()>;
}
