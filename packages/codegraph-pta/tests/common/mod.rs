//! Common test utilities for codegraph-pta
//!
//! Shared program fixtures and assertions for the integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use fixtures::*;

/// Route solver logs to the test harness; honors `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
