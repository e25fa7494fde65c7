//! Tests for task management: domain validation, authorization policy,
//! service orchestration, and statistics.

mod service_tests;
mod unconfigured_store_tests;
