// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqlany-dialect
//!
//! This crate provides common testing components including:
//! - SQL fixtures with their expected SQL Anywhere rewrites
//! - Statement tree fixtures
//! - Proptest strategies for nested queries
//! - SQL-specific assertions

pub mod assertions;
pub mod fixtures;
pub mod strategies;

// Re-exports for convenience
pub use assertions::SqlAssertions;
pub use fixtures::{RewriteCase, SqlFixtures, StatementFixtures};
pub use strategies::{NestedLevel, NestedQuery};

/// Install a test subscriber honoring `RUST_LOG`; repeated calls are no-ops
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
