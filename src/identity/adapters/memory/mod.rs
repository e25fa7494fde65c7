//! In-memory identity adapters for service tests.

mod session;
mod user;

pub use session::InMemorySessionStore;
pub use user::InMemoryUserRepository;
