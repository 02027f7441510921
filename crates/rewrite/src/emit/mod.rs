// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Emitters
//!
//! Structured path: serialize a [`SelectStatement`] tree into SQL text for a
//! given dialect. Nested subqueries (derived tables, subquery expressions)
//! are emitted by the same emitter, so every level gets the same rewriting.

pub mod ansi;
pub mod base;
pub mod sqlanywhere;

pub use ansi::AnsiEmitter;
pub use base::EmitterBase;
pub use sqlanywhere::SqlAnywhereEmitter;

use sqlany_dialect_ir::{Dialect, DialectExtensions, SelectStatement};

use crate::config::RewriteConfig;
use crate::context::RewriteContext;
use crate::error::RewriteResult;

/// Dialect-specific statement serializer
///
/// Emitting never modifies the statement it is given; any rewriting is done
/// on a derived copy.
pub trait Emitter: EmitterBase {
    /// Get the dialect this emitter targets
    fn dialect(&self) -> Dialect;

    fn config(&self) -> &RewriteConfig;

    /// Serialize `statement` with a fresh [`RewriteContext`]
    fn emit(&self, statement: &SelectStatement) -> RewriteResult<String> {
        let mut ctx = RewriteContext::new(self.config().clone());
        self.emit_statement(&mut ctx, statement)
    }
}

/// Emitter for `dialect`
pub fn emitter_for(dialect: Dialect, config: RewriteConfig) -> Box<dyn Emitter> {
    if dialect.supports(DialectExtensions::TopStartAt) {
        Box::new(SqlAnywhereEmitter::with_config(config))
    } else {
        Box::new(AnsiEmitter::with_config(config))
    }
}
