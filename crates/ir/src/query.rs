// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query Representation
//!
//! The select-statement tree produced by the upstream query builder.
//!
//! ## Statement Structure
//!
//! A [`SelectStatement`] consists of:
//!
//! - **Cores**: one or more [`SelectCore`]s (projection, FROM, WHERE, GROUP BY, HAVING)
//! - **Orders**: the ORDER BY list
//! - **Limit**: row count limit
//! - **Offset**: 0-based row offset
//! - **Lock**: optional locking clause
//!
//! Limit and offset are plain counts. How they are spelled (`LIMIT`/`OFFSET`
//! or `TOP`/`START AT`) is decided by the emitter, not by the tree.
//!
//! ## Select Core
//!
//! [`SelectCore::distinct`] is the DISTINCT marker of the projection list. The
//! rewriter reads it as given and never re-derives it from projection text.
//!
//! ## Table References and Joins
//!
//! [`TableRef`] is a [`TableFactor`] (named table, derived table, or raw
//! fragment) followed by its joins:
//!
//! ```sql
//! FROM users u LEFT JOIN orders o ON u.id = o.user_id
//! FROM (SELECT id FROM users LIMIT 5) recent
//! ```
//!
//! ## Builder Pattern
//!
//! ```rust
//! use sqlany_dialect_ir::{Expr, OrderBy, SelectCore, SelectStatement, TableRef};
//!
//! let statement = SelectStatement::new()
//!     .with_core(
//!         SelectCore::new()
//!             .with_projection(Expr::column("id"))
//!             .with_from(TableRef::table("users")),
//!     )
//!     .with_order(OrderBy::desc(Expr::column("created_at")))
//!     .with_limit(10)
//!     .with_offset(20);
//!
//! assert_eq!(statement.limit, Some(10));
//! ```

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// A SELECT statement as built by the upstream query builder
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectStatement {
    /// Select cores, in order
    pub cores: Vec<SelectCore>,

    /// ORDER BY list
    #[serde(default)]
    pub orders: Vec<OrderBy>,

    /// Maximum number of rows
    #[serde(default)]
    pub limit: Option<u64>,

    /// Number of leading rows to skip (0-based)
    #[serde(default)]
    pub offset: Option<u64>,

    /// Locking clause
    #[serde(default)]
    pub lock: Option<Lock>,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_core(mut self, core: SelectCore) -> Self {
        self.cores.push(core);
        self
    }

    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.orders.push(order);
        self
    }

    pub fn with_orders(mut self, orders: impl IntoIterator<Item = OrderBy>) -> Self {
        self.orders.extend(orders);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// True when any core carries the DISTINCT marker
    pub fn is_distinct(&self) -> bool {
        self.cores.iter().any(|core| core.distinct)
    }
}

/// Projection, source and filtering part of a SELECT
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectCore {
    /// DISTINCT marker of the projection list
    #[serde(default)]
    pub distinct: bool,

    /// Projection list
    pub projections: Vec<SelectItem>,

    /// FROM clause
    #[serde(default)]
    pub from: Vec<TableRef>,

    /// WHERE predicates, joined with AND
    #[serde(default)]
    pub wheres: Vec<Expr>,

    /// GROUP BY clause
    #[serde(default)]
    pub groups: Vec<Expr>,

    /// HAVING predicate
    #[serde(default)]
    pub having: Option<Expr>,
}

impl SelectCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn with_projection(mut self, expr: Expr) -> Self {
        self.projections.push(SelectItem::UnnamedExpr(expr));
        self
    }

    pub fn with_item(mut self, item: SelectItem) -> Self {
        self.projections.push(item);
        self
    }

    pub fn with_from(mut self, table: TableRef) -> Self {
        self.from.push(table);
        self
    }

    pub fn with_where(mut self, predicate: Expr) -> Self {
        self.wheres.push(predicate);
        self
    }

    pub fn with_group(mut self, expr: Expr) -> Self {
        self.groups.push(expr);
        self
    }

    pub fn with_having(mut self, predicate: Expr) -> Self {
        self.having = Some(predicate);
        self
    }
}

/// Item in a SELECT projection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// Unnamed expression (e.g., `column` or `a + b`)
    UnnamedExpr(Expr),

    /// Expression with alias (e.g., `col AS name`)
    AliasedExpr { expr: Expr, alias: String },

    /// Qualified wildcard (e.g., `table.*`)
    QualifiedWildcard(String),

    /// Unqualified wildcard (`*`)
    Wildcard,
}

/// Table reference in FROM clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    /// The leading table source
    pub factor: TableFactor,

    /// Joins
    #[serde(default)]
    pub joins: Vec<Join>,
}

impl TableRef {
    /// Named table without alias
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            factor: TableFactor::Table {
                name: name.into(),
                alias: None,
            },
            joins: Vec::new(),
        }
    }

    /// Derived table `(subquery) alias`
    pub fn derived(subquery: SelectStatement, alias: impl Into<String>) -> Self {
        Self {
            factor: TableFactor::Derived {
                subquery: Box::new(subquery),
                alias: Some(alias.into()),
            },
            joins: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        match &mut self.factor {
            TableFactor::Table { alias: slot, .. } | TableFactor::Derived { alias: slot, .. } => {
                *slot = Some(alias.into());
            }
            TableFactor::Raw(_) => {}
        }
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }
}

/// A single table source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableFactor {
    /// Named table (may include owner/schema)
    Table { name: String, alias: Option<String> },

    /// Parenthesized subquery
    Derived {
        subquery: Box<SelectStatement>,
        alias: Option<String>,
    },

    /// Pre-rendered source fragment
    Raw(String),
}

/// JOIN clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    /// Join type
    pub join_type: JoinType,

    /// Table to join
    pub table: TableRef,

    /// Join condition
    pub condition: JoinCondition,
}

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// Join condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinCondition {
    On(Expr),
    Using(Vec<String>),
    Natural,
    None,
}

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub expr: Expr,
    #[serde(default)]
    pub direction: Option<SortDirection>,
}

impl OrderBy {
    /// Order item with no explicit direction
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            direction: None,
        }
    }

    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: Some(SortDirection::Asc),
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: Some(SortDirection::Desc),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Locking clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lock {
    /// `FOR UPDATE`
    ForUpdate,

    /// Pre-rendered locking clause (e.g., `FOR READ ONLY`)
    Raw(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_default() {
        let statement = SelectStatement::new();
        assert!(statement.cores.is_empty());
        assert!(statement.orders.is_empty());
        assert!(statement.limit.is_none());
        assert!(!statement.is_distinct());
    }

    #[test]
    fn test_is_distinct_reads_marker() {
        let statement = SelectStatement::new()
            .with_core(SelectCore::new().with_projection(Expr::column("a")))
            .with_core(SelectCore::new().distinct().with_projection(Expr::column("b")));
        assert!(statement.is_distinct());
    }

    #[test]
    fn test_order_by() {
        let ob = OrderBy::asc(Expr::column("id"));
        assert_eq!(ob.direction, Some(SortDirection::Asc));
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }

    #[test]
    fn test_table_alias() {
        let table = TableRef::table("users").with_alias("u");
        assert!(matches!(
            table.factor,
            TableFactor::Table { ref alias, .. } if alias.as_deref() == Some("u")
        ));
    }
}
