// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the rewrite layer

use serde::Serialize;

/// Result type alias for rewrite operations
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Errors that can occur while rewriting SQL for the target dialect
///
/// Positions are character offsets into the text handed to the call that
/// failed, which for nested subqueries is the subquery text.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum RewriteError {
    /// A quoted span never closes
    #[error("Quotes do not match: quote opened at position {position} is never closed")]
    UnbalancedQuotes { position: usize },

    /// A closing parenthesis without an opener, or an opener never closed
    #[error("Braces do not match at position {position}")]
    MalformedParens { position: usize },

    /// Subquery nesting exceeded the configured maximum
    #[error("Rewrite nesting too deep (depth: {depth}, limit: {limit})")]
    RewriteTooDeep { depth: usize, limit: usize },

    /// The text is not a shape the rewriter knows; it is passed through
    #[error("Unsupported statement shape: {reason}")]
    UnsupportedShape { reason: String },
}

impl RewriteError {
    /// True for errors that reject the statement outright
    pub fn is_invalid_statement(&self) -> bool {
        !matches!(self, RewriteError::UnsupportedShape { .. })
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RewriteError::UnbalancedQuotes { .. } => ErrorSeverity::Error,
            RewriteError::MalformedParens { .. } => ErrorSeverity::Error,
            RewriteError::RewriteTooDeep { .. } => ErrorSeverity::Error,
            RewriteError::UnsupportedShape { .. } => ErrorSeverity::Info,
        }
    }
}

/// Severity level for rewrite errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational note (e.g., passthrough of a non-SELECT statement)
    Info,
    /// Error (the statement is rejected)
    Error,
}
