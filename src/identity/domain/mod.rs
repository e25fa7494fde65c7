//! Domain model for user identity.
//!
//! Identity types are pure data: validated scalar newtypes, the user record
//! as persisted, and the caller identity ([`Actor`]) that the task module's
//! authorization policy evaluates.

mod error;
mod ids;
mod user;

pub use error::{IdentityDomainError, ParseUserRoleError};
pub use ids::{OpenId, UserId};
pub use user::{Actor, User, UserRole, UserUpsert};
