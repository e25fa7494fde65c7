//! Tests for user identity: domain parsing, login upsert, and the auth
//! surface.

mod domain_tests;
mod unconfigured_store_tests;
