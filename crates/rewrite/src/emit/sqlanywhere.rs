// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL Anywhere Emitter
//!
//! Clause order:
//!
//! ```text
//! SELECT [DISTINCT] [TOP n] [START AT m+1] <projections> FROM ... [WHERE ...]
//!     [GROUP BY ...] [HAVING ...] [ORDER BY ...] [<lock>]
//! ```
//!
//! - `DISTINCT` always precedes `TOP`; the engine rejects the reverse.
//! - `START AT` is 1-based, so the tree's 0-based offset is shifted by one.
//! - An offset without a limit gets the configured implicit limit as `TOP`.
//! - DISTINCT statements with an ORDER BY go through
//!   [`alias_distinct_orders`] first, once per statement.
//! - Booleans are emitted as `1`/`0`.

use std::borrow::Cow;

use sqlany_dialect_ir::{Dialect, DialectExtensions, Literal, SelectStatement};
use tracing::trace;

use super::base::join_parts;
use super::{Emitter, EmitterBase};
use crate::aliasing::alias_distinct_orders;
use crate::config::RewriteConfig;
use crate::context::RewriteContext;
use crate::error::{RewriteError, RewriteResult};

#[derive(Debug, Clone, Default)]
pub struct SqlAnywhereEmitter {
    config: RewriteConfig,
}

impl SqlAnywhereEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RewriteConfig) -> Self {
        Self { config }
    }
}

impl EmitterBase for SqlAnywhereEmitter {
    fn emit_statement(
        &self,
        ctx: &mut RewriteContext,
        statement: &SelectStatement,
    ) -> RewriteResult<String> {
        let statement = if self
            .dialect()
            .supports(DialectExtensions::DistinctOrderByOutsideProjection)
        {
            Cow::Borrowed(statement)
        } else {
            alias_distinct_orders(self, ctx, statement)?
        };

        let limit = statement
            .limit
            .or_else(|| statement.offset.and(ctx.implicit_limit()));

        let mut parts = vec!["SELECT".to_string()];
        if statement.is_distinct() {
            parts.push("DISTINCT".to_string());
        }
        if let Some(limit) = limit {
            parts.push(format!("TOP {}", limit));
        }
        if let Some(offset) = statement.offset {
            parts.push(format!("START AT {}", start_at_row(offset)?));
        }
        for core in &statement.cores {
            parts.push(self.render_core(ctx, core)?);
        }
        if !statement.orders.is_empty() {
            parts.push(format!("ORDER BY {}", self.render_orders(ctx, &statement.orders)?));
        }
        if let Some(lock) = &statement.lock {
            parts.push(self.render_lock(lock));
        }

        let sql = join_parts(parts);
        trace!(depth = ctx.depth(), sql = %sql, "emitted statement");
        Ok(sql)
    }

    fn render_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Boolean(true) => "1".to_string(),
            Literal::Boolean(false) => "0".to_string(),
            Literal::Null => "NULL".to_string(),
            Literal::Integer(value) => value.to_string(),
            Literal::Float(value) => value.to_string(),
            Literal::String(value) => format!("'{}'", value.replace('\'', "''")),
        }
    }
}

/// 1-based `START AT` row for a 0-based offset.
///
/// Fails with [`RewriteError::UnsupportedShape`] when the row number does not
/// fit in a `u64`.
pub(crate) fn start_at_row(offset: u64) -> RewriteResult<u64> {
    offset
        .checked_add(1)
        .ok_or_else(|| RewriteError::UnsupportedShape {
            reason: format!("OFFSET {} has no START AT row", offset),
        })
}

impl Emitter for SqlAnywhereEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::SqlAnywhere
    }

    fn config(&self) -> &RewriteConfig {
        &self.config
    }
}
