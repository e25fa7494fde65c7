//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The external identity is empty after trimming.
    #[error("open id must not be empty")]
    EmptyOpenId,

    /// The external identity exceeds the persisted column width.
    #[error("open id too long: {0} characters, maximum is 64")]
    OpenIdTooLong(usize),
}

/// Error returned while parsing user roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);
