//! Thread-safe in-memory user repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::{StoreError, StoreResult};
use crate::identity::{
    domain::{OpenId, User, UserId, UserRole, UserUpsert},
    ports::UserRepository,
};

/// In-memory user repository with store-style surrogate id assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    open_id_index: HashMap<OpenId, UserId>,
    next_id: i32,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, record: &UserUpsert) -> StoreResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        let now = record.last_signed_in.unwrap_or_else(Utc::now);

        if let Some(id) = state.open_id_index.get(&record.open_id).copied() {
            let user = state
                .users
                .get_mut(&id)
                .ok_or_else(|| lock_error("open id index points at a missing user row"))?;
            if let Some(name) = &record.name {
                user.name = Some(name.clone());
            }
            if let Some(email) = &record.email {
                user.email = Some(email.clone());
            }
            if let Some(login_method) = &record.login_method {
                user.login_method = Some(login_method.clone());
            }
            if let Some(role) = record.role {
                user.role = role;
            }
            user.last_signed_in = now;
            user.updated_at = now;
            return Ok(user.clone());
        }

        state.next_id += 1;
        let id = UserId::new(state.next_id);
        let user = User {
            id,
            open_id: record.open_id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            login_method: record.login_method.clone(),
            role: record.role.unwrap_or(UserRole::User),
            last_signed_in: now,
            created_at: now,
            updated_at: now,
        };
        state.open_id_index.insert(record.open_id.clone(), id);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_open_id(&self, open_id: &OpenId) -> StoreResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .open_id_index
            .get(open_id)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|user| user.id.into_inner());
        Ok(users)
    }
}
