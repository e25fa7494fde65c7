//! Application services for user identity.

mod auth;
mod login;

pub use auth::AuthService;
pub use login::{
    IdentityConfig, IdentityServiceError, IdentityServiceResult, LoginService, OWNER_OPEN_ID_VAR,
};
