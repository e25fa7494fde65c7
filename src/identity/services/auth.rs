//! Auth surface exposed to the transport: `me` and `logout`.

use super::login::IdentityServiceResult;
use crate::identity::{
    domain::User,
    ports::{SessionStore, SessionToken, UserRepository},
};
use std::sync::Arc;

/// Caller-identity service over the session store.
#[derive(Clone)]
pub struct AuthService<S, R>
where
    S: SessionStore,
    R: UserRepository,
{
    sessions: Arc<S>,
    users: Arc<R>,
}

impl<S, R> AuthService<S, R>
where
    S: SessionStore,
    R: UserRepository,
{
    /// Creates a new auth service.
    #[must_use]
    pub const fn new(sessions: Arc<S>, users: Arc<R>) -> Self {
        Self { sessions, users }
    }

    /// Resolves the caller's session to a user record.
    ///
    /// Returns `None` for absent, unknown, or invalidated sessions, and for
    /// sessions whose user row no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::IdentityServiceError::Store`] when resolution fails.
    pub async fn me(&self, token: Option<&SessionToken>) -> IdentityServiceResult<Option<User>> {
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(user_id) = self.sessions.resolve(token).await? else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// Invalidates the caller's session artifact.
    ///
    /// Logging out an unknown session succeeds; the cookie clearing itself
    /// is owned by the transport.
    ///
    /// # Errors
    ///
    /// Returns [`super::IdentityServiceError::Store`] when invalidation
    /// fails.
    pub async fn logout(&self, token: &SessionToken) -> IdentityServiceResult<()> {
        Ok(self.sessions.invalidate(token).await?)
    }
}
