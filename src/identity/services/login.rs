//! Service layer for the login-time user upsert.

use crate::db::StoreError;
use crate::identity::{
    domain::{IdentityDomainError, OpenId, User, UserId, UserRole, UserUpsert},
    ports::UserRepository,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Environment variable naming the owner identity.
pub const OWNER_OPEN_ID_VAR: &str = "OWNER_OPEN_ID";

/// Identity configuration supplied by the host process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// External identity that is always granted the admin role.
    pub owner_open_id: Option<OpenId>,
}

impl IdentityConfig {
    /// Loads the configuration from `OWNER_OPEN_ID`.
    ///
    /// A missing or malformed value leaves the owner identity unset.
    #[must_use]
    pub fn from_env() -> Self {
        let owner_open_id = std::env::var(OWNER_OPEN_ID_VAR)
            .ok()
            .and_then(|value| OpenId::new(value).ok());
        Self { owner_open_id }
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Login orchestration service.
///
/// Applies the owner-admin rule and defaults the login timestamp before
/// handing the upsert record to the repository.
#[derive(Clone)]
pub struct LoginService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: IdentityConfig,
}

impl<R, C> LoginService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new login service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, config: IdentityConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Records a login: inserts the user or refreshes the existing row.
    ///
    /// When the record carries no explicit role and its `open_id` matches
    /// the configured owner identity, the admin role is forced. The login
    /// timestamp defaults to the current clock time so every login is
    /// observable even when no other field changed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Store`] when the store is
    /// unavailable or rejects the write. The write is never silently
    /// dropped.
    pub async fn sign_in(&self, mut record: UserUpsert) -> IdentityServiceResult<User> {
        if record.role.is_none()
            && self
                .config
                .owner_open_id
                .as_ref()
                .is_some_and(|owner| *owner == record.open_id)
        {
            record.role = Some(UserRole::Admin);
        }
        if record.last_signed_in.is_none() {
            record.last_signed_in = Some(self.clock.utc());
        }
        Ok(self.repository.upsert(&record).await?)
    }

    /// Finds a user by external identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Store`] when the lookup fails.
    pub async fn find_by_open_id(&self, open_id: &OpenId) -> IdentityServiceResult<Option<User>> {
        Ok(self.repository.find_by_open_id(open_id).await?)
    }

    /// Finds a user by surrogate identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Store`] when the lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> IdentityServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
