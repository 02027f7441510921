// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL Anywhere Dialect - Query Tree
//!
//! This crate holds the select-statement tree that an upstream query builder
//! hands to the dialect rewriter. The tree is:
//! - Dialect-agnostic (the builder writes portable `LIMIT`/`OFFSET` queries)
//! - Already built (nothing here parses SQL text)
//! - Serializable, so trees can cross process boundaries as JSON

pub mod dialect;
pub mod expr;
pub mod query;

// Re-export commonly used types
pub use dialect::{Dialect, DialectExtensions, ParseDialectError};
pub use expr::{BinaryOp, ColumnRef, Expr, Literal, UnaryOp};
pub use query::{
    Join, JoinCondition, JoinType, Lock, OrderBy, SelectCore, SelectItem, SelectStatement,
    SortDirection, TableFactor, TableRef,
};
