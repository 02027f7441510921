// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Generic emitter producing the portable `LIMIT`/`OFFSET` form

use sqlany_dialect_ir::{Dialect, SelectStatement};

use super::base::join_parts;
use super::{Emitter, EmitterBase};
use crate::config::RewriteConfig;
use crate::context::RewriteContext;
use crate::error::RewriteResult;

/// Emits `SELECT [DISTINCT] ... [ORDER BY ..] [LIMIT n] [OFFSET m] [lock]`
#[derive(Debug, Clone, Default)]
pub struct AnsiEmitter {
    config: RewriteConfig,
}

impl AnsiEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RewriteConfig) -> Self {
        Self { config }
    }
}

impl EmitterBase for AnsiEmitter {
    fn emit_statement(
        &self,
        ctx: &mut RewriteContext,
        statement: &SelectStatement,
    ) -> RewriteResult<String> {
        let mut parts = vec!["SELECT".to_string()];
        if statement.is_distinct() {
            parts.push("DISTINCT".to_string());
        }
        for core in &statement.cores {
            parts.push(self.render_core(ctx, core)?);
        }
        if !statement.orders.is_empty() {
            parts.push(format!("ORDER BY {}", self.render_orders(ctx, &statement.orders)?));
        }
        if let Some(limit) = statement.limit {
            parts.push(format!("LIMIT {}", limit));
        }
        if let Some(offset) = statement.offset {
            parts.push(format!("OFFSET {}", offset));
        }
        if let Some(lock) = &statement.lock {
            parts.push(self.render_lock(lock));
        }

        Ok(join_parts(parts))
    }
}

impl Emitter for AnsiEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Ansi
    }

    fn config(&self) -> &RewriteConfig {
        &self.config
    }
}
