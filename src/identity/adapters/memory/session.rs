//! Thread-safe in-memory session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::{StoreError, StoreResult};
use crate::identity::{
    domain::UserId,
    ports::{SessionStore, SessionToken},
};

/// In-memory session store mapping opaque tokens to user identifiers.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, UserId>>>,
}

impl InMemorySessionStore {
    /// Creates an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: SessionToken, user: UserId) -> StoreResult<()> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        sessions.insert(token, user);
        Ok(())
    }

    async fn resolve(&self, token: &SessionToken) -> StoreResult<Option<UserId>> {
        let sessions = self.sessions.read().map_err(lock_error)?;
        Ok(sessions.get(token).copied())
    }

    async fn invalidate(&self, token: &SessionToken) -> StoreResult<()> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        sessions.remove(token);
        Ok(())
    }
}
