//! Repository port for user persistence and lookup.

use crate::db::StoreResult;
use crate::identity::domain::{OpenId, User, UserId, UserUpsert};
use async_trait::async_trait;

/// User persistence contract.
///
/// The backing store owns surrogate identifier assignment; exactly one row
/// exists per `open_id`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user or updates the existing row's mutable fields,
    /// keyed on `open_id`. Returns the stored row.
    ///
    /// Absent fields in the record are left untouched on an existing row.
    /// The record's `last_signed_in` is always applied, so a login with no
    /// field changes still refreshes the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`crate::db::StoreError::Unavailable`] when no store is
    /// configured; store-level failures propagate unchanged.
    async fn upsert(&self, record: &UserUpsert) -> StoreResult<User>;

    /// Finds a user by external identity.
    ///
    /// Returns `None` when the user does not exist or no store is
    /// configured.
    async fn find_by_open_id(&self, open_id: &OpenId) -> StoreResult<Option<User>>;

    /// Finds a user by surrogate identifier.
    ///
    /// Returns `None` when the user does not exist or no store is
    /// configured.
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Returns all users, in store order.
    ///
    /// Returns an empty list when no store is configured.
    async fn list_all(&self) -> StoreResult<Vec<User>>;
}
