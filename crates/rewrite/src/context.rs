// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rewrite context for tracking state during a rewrite call

use crate::config::RewriteConfig;
use crate::error::RewriteError;

/// Context for tracking state during one rewrite call
///
/// The context maintains:
/// - The configuration shared by both rewrite paths
/// - Current subquery recursion depth
///
/// A context is created per top-level call and is never shared between
/// calls.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    config: RewriteConfig,

    /// Current recursion depth
    recursion_depth: usize,
}

impl RewriteContext {
    /// Create a new rewrite context
    pub fn new(config: RewriteConfig) -> Self {
        Self {
            config,
            recursion_depth: 0,
        }
    }

    /// Create a new rewrite context with custom max recursion depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::new(RewriteConfig::default().with_max_depth(max_depth))
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// `TOP` value forced when an offset has no limit
    pub fn implicit_limit(&self) -> Option<u64> {
        self.config.implicit_limit
    }

    pub fn depth(&self) -> usize {
        self.recursion_depth
    }

    /// Increment recursion depth and check for overflow
    pub fn enter_recursive_context(&mut self) -> Result<(), RewriteError> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.config.max_depth {
            let error = RewriteError::RewriteTooDeep {
                depth: self.recursion_depth,
                limit: self.config.max_depth,
            };
            self.recursion_depth -= 1;
            Err(error)
        } else {
            Ok(())
        }
    }

    /// Decrement recursion depth when exiting a recursive context
    pub fn exit_recursive_context(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}

impl Default for RewriteContext {
    fn default() -> Self {
        Self::new(RewriteConfig::default())
    }
}
