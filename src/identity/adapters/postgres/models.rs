//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Store-assigned surrogate identifier.
    pub id: i32,
    /// External OAuth identity.
    pub open_id: String,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Login method label.
    pub login_method: Option<String>,
    /// Access role.
    pub role: String,
    /// Timestamp of the latest login.
    pub last_signed_in: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records.
///
/// `role` is optional so that absent roles fall back to the column default
/// rather than overwriting it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// External OAuth identity.
    pub open_id: String,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Login method label.
    pub login_method: Option<String>,
    /// Access role, when explicitly supplied.
    pub role: Option<String>,
    /// Timestamp of the latest login.
    pub last_signed_in: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Conflict changeset applied when the `open_id` already exists.
///
/// `None` fields are skipped, so fields absent from the upsert record are
/// left untouched. `last_signed_in` and `updated_at` are always applied,
/// which also keeps the changeset non-empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    /// Display name to set, if any.
    pub name: Option<String>,
    /// Contact email to set, if any.
    pub email: Option<String>,
    /// Login method label to set, if any.
    pub login_method: Option<String>,
    /// Role to set, if any.
    pub role: Option<String>,
    /// Login timestamp, always refreshed.
    pub last_signed_in: DateTime<Utc>,
    /// Update timestamp, always refreshed.
    pub updated_at: DateTime<Utc>,
}
