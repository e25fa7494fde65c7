//! User record, role, and caller identity types.

use super::{OpenId, ParseUserRoleError, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role attached to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular user: sees and mutates only their own tasks.
    #[default]
    User,
    /// Administrator: sees and mutates every task.
    Admin,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// User record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned surrogate identifier.
    pub id: UserId,
    /// External OAuth identity, unique per user.
    pub open_id: OpenId,
    /// Display name, if provided at login.
    pub name: Option<String>,
    /// Contact email, if provided at login.
    pub email: Option<String>,
    /// Login method label for display and audit.
    pub login_method: Option<String>,
    /// Access role.
    pub role: UserRole,
    /// Timestamp of the latest login.
    pub last_signed_in: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns the caller identity for this user.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
        }
    }
}

/// Authenticated caller identity evaluated by the authorization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the calling user.
    pub id: UserId,
    /// Role of the calling user.
    pub role: UserRole,
}

impl Actor {
    /// Creates a caller identity.
    #[must_use]
    pub const fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Returns whether the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

/// Upsert record applied at login, keyed on `open_id`.
///
/// Fields left as `None` are not touched on an existing row. The login
/// service guarantees `last_signed_in` is populated before the record
/// reaches a repository, so every login is observable even when nothing
/// else changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpsert {
    /// External identity the upsert is keyed on.
    pub open_id: OpenId,
    /// Display name to set, if any.
    pub name: Option<String>,
    /// Contact email to set, if any.
    pub email: Option<String>,
    /// Login method label to set, if any.
    pub login_method: Option<String>,
    /// Explicit role to set. Left unset, new rows default to
    /// [`UserRole::User`] and existing rows keep their role.
    pub role: Option<UserRole>,
    /// Login timestamp to record.
    pub last_signed_in: Option<DateTime<Utc>>,
}

impl UserUpsert {
    /// Creates an upsert record for the given external identity.
    #[must_use]
    pub const fn new(open_id: OpenId) -> Self {
        Self {
            open_id,
            name: None,
            email: None,
            login_method: None,
            role: None,
            last_signed_in: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the login method label.
    #[must_use]
    pub fn with_login_method(mut self, login_method: impl Into<String>) -> Self {
        self.login_method = Some(login_method.into());
        self
    }

    /// Sets an explicit role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the login timestamp.
    #[must_use]
    pub const fn with_last_signed_in(mut self, at: DateTime<Utc>) -> Self {
        self.last_signed_in = Some(at);
        self
    }
}
