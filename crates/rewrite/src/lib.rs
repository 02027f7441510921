// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL Anywhere Dialect - Rewrite Layer
//!
//! Translates portable SQL into the dialect accepted by SQL Anywhere, which
//! has no `LIMIT`/`OFFSET` and forbids `ORDER BY` on columns missing from a
//! `DISTINCT` projection list.
//!
//! ## Two entry points
//!
//! - **Structured path** ([`emit`]): serialize a
//!   [`SelectStatement`](sqlany_dialect_ir::SelectStatement) tree with
//!   [`SqlAnywhereEmitter`]. Row limiting becomes leading `TOP`/`START AT`
//!   tokens and DISTINCT + ORDER BY statements are rewritten with windowed
//!   aliases ([`aliasing`]). This is the primary path.
//! - **Raw-text path** ([`raw`]): rewrite a finished SQL string. Every
//!   parenthesized subquery is rewritten recursively, then the outer
//!   `SELECT ... LIMIT n OFFSET m` is re-emitted as `SELECT TOP n START AT m+1 ...`.
//!   Kept for callers that cannot supply a tree.
//!
//! Both paths are pure: no I/O, no shared state, and the caller's input is
//! never modified.
//!
//! ## Usage
//!
//! ```rust
//! use sqlany_dialect_ir::{Expr, OrderBy, SelectCore, SelectStatement, TableRef};
//! use sqlany_dialect_rewrite::{Emitter, SqlAnywhereEmitter, rewrite_sql};
//!
//! // Raw text
//! let sql = rewrite_sql("SELECT * FROM users LIMIT 10 OFFSET 20").unwrap();
//! assert_eq!(sql, "SELECT TOP 10 START AT 21 * FROM users");
//!
//! // Statement tree
//! let statement = SelectStatement::new()
//!     .with_core(
//!         SelectCore::new()
//!             .with_projection(Expr::column("id"))
//!             .with_from(TableRef::table("users")),
//!     )
//!     .with_order(OrderBy::asc(Expr::column("id")))
//!     .with_limit(10);
//! let sql = SqlAnywhereEmitter::new().emit(&statement).unwrap();
//! assert_eq!(sql, "SELECT TOP 10 id FROM users ORDER BY id ASC");
//! ```

pub mod aliasing;
pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod order_split;
pub mod raw;
pub mod scanner;

pub use aliasing::{alias_distinct_orders, alias_order_clause, distinct_projection};
pub use config::{ConfigError, RewriteConfig};
pub use context::RewriteContext;
pub use emit::{AnsiEmitter, Emitter, EmitterBase, SqlAnywhereEmitter, emitter_for};
pub use error::{ErrorSeverity, RewriteError, RewriteResult};
pub use order_split::split_order_list;
pub use raw::{
    RewriteOutcome, RewriteStatus, contains_limit_or_offset, rewrite_sql, rewrite_sql_with_config,
    rewrite_sql_with_outcome, yields_no_rows,
};
pub use scanner::{ScanState, Scanned, Scanner};
