//! Shared store handle and error taxonomy.
//!
//! The [`Database`] handle owns the process-wide connection pool. It is
//! lazily initialized on first use behind a single-assignment guard so that
//! concurrent first-users never race two live pools into existence. When no
//! connection URL is configured the handle stays unconfigured: adapters
//! degrade reads to empty results and fail writes with
//! [`StoreError::Unavailable`] instead of crashing at startup.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Environment variable holding the store connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by persistence adapters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A write was attempted with no configured persistence.
    #[error("store unavailable: no database configured")]
    Unavailable,

    /// The underlying store rejected the operation.
    #[error("store error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Lazily initialized, process-wide store handle.
///
/// Construction never touches the network; the pool is built on first use.
/// The pool itself is created with `build_unchecked`, so initialization
/// cannot fail: connection errors surface per-operation when a connection is
/// checked out.
#[derive(Debug)]
pub struct Database {
    url: Option<String>,
    pool: OnceLock<PgPool>,
}

impl Database {
    /// Creates a handle for the given connection URL, or an unconfigured
    /// handle when `url` is `None`.
    #[must_use]
    pub const fn new(url: Option<String>) -> Self {
        Self {
            url,
            pool: OnceLock::new(),
        }
    }

    /// Creates a handle configured from the `DATABASE_URL` environment
    /// variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(DATABASE_URL_VAR).ok())
    }

    /// Creates a handle with no backing store.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self::new(None)
    }

    /// Returns whether a connection URL is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Returns the connection pool, initializing it on first use.
    ///
    /// Returns `None` when no connection URL is configured. The `OnceLock`
    /// guard guarantees exactly one pool is ever built, even under
    /// concurrent first use.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        let url = self.url.as_deref()?;
        Some(self.pool.get_or_init(|| {
            let manager = ConnectionManager::<PgConnection>::new(url);
            Pool::builder().build_unchecked(manager)
        }))
    }
}
