// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rewrite Configuration
//!
//! Both rewrite paths share one [`RewriteConfig`] so that they emit the same
//! SQL for the same logical query.
//!
//! ## Example
//!
//! ```rust
//! use sqlany_dialect_rewrite::RewriteConfig;
//!
//! let config = RewriteConfig {
//!     max_depth: 16,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default subquery nesting allowed before `RewriteTooDeep`
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Row count used for `TOP` when only an offset is given
pub const DEFAULT_IMPLICIT_LIMIT: u64 = 1_000_000;

/// Settings for a rewrite call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteConfig {
    /// Maximum subquery nesting depth
    pub max_depth: usize,

    /// `TOP` value forced when an offset has no limit.
    ///
    /// `None` emits a bare `START AT`.
    pub implicit_limit: Option<u64>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            implicit_limit: Some(DEFAULT_IMPLICIT_LIMIT),
        }
    }
}

impl RewriteConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_implicit_limit(mut self, implicit_limit: Option<u64>) -> Self {
        self.implicit_limit = implicit_limit;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }
        if self.implicit_limit == Some(0) {
            return Err(ConfigError::InvalidImplicitLimit);
        }
        Ok(())
    }

    /// Parse a configuration from a JSON payload.
    ///
    /// Expected shape (every field optional):
    /// {
    ///   "maxDepth": 64,
    ///   "implicitLimit": 1000000
    /// }
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::Malformed { reason: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Depth limit of zero would reject every statement
    #[error("maxDepth must be at least 1")]
    InvalidMaxDepth,

    /// `TOP 0` is rejected by the engine
    #[error("implicitLimit must be a positive row count")]
    InvalidImplicitLimit,

    /// Payload could not be deserialized
    #[error("Malformed rewrite configuration: {reason}")]
    Malformed { reason: String },
}
