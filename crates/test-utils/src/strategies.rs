// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Proptest strategies for generated SQL
//!
//! Generated identifiers carry a `c_`/`t_` prefix so they never collide
//! with a keyword.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use sqlany_dialect_ir::{Expr, SelectCore, SelectStatement, TableRef};

/// One SELECT level of a [`NestedQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedLevel {
    pub distinct: bool,
    pub column: String,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A chain of SELECTs, each reading from the next as a derived table.
///
/// `levels[0]` is the innermost SELECT; it reads from `table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedQuery {
    pub table: String,
    pub levels: Vec<NestedLevel>,
}

impl NestedQuery {
    /// Queries with between one and `max_depth + 1` levels
    pub fn strategy(max_depth: usize) -> impl Strategy<Value = NestedQuery> {
        (table_name(), vec(level(), 1..=max_depth + 1))
            .prop_map(|(table, levels)| NestedQuery { table, levels })
    }

    /// Number of enclosing levels around the innermost SELECT
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Portable text with trailing `LIMIT`/`OFFSET` clauses
    pub fn ansi_sql(&self) -> String {
        self.render(|level| {
            let mut trailer = String::new();
            if let Some(limit) = level.limit {
                trailer.push_str(&format!(" LIMIT {}", limit));
            }
            if let Some(offset) = level.offset {
                trailer.push_str(&format!(" OFFSET {}", offset));
            }
            (String::new(), trailer)
        })
    }

    /// Expected SQL Anywhere text for the given implicit limit
    pub fn sqlanywhere_sql(&self, implicit_limit: Option<u64>) -> String {
        self.render(|level| {
            let mut header = String::new();
            let limit = level.limit.or_else(|| level.offset.and(implicit_limit));
            if let Some(limit) = limit {
                header.push_str(&format!(" TOP {}", limit));
            }
            if let Some(offset) = level.offset {
                header.push_str(&format!(" START AT {}", offset + 1));
            }
            (header, String::new())
        })
    }

    /// The same query as a statement tree
    pub fn statement(&self) -> SelectStatement {
        let mut source = TableRef::table(self.table.clone());
        let mut statement = SelectStatement::new();
        for (index, level) in self.levels.iter().enumerate() {
            let mut core = SelectCore::new()
                .with_projection(Expr::column(level.column.clone()))
                .with_from(source);
            if level.distinct {
                core = core.distinct();
            }
            statement = SelectStatement::new().with_core(core);
            statement.limit = level.limit;
            statement.offset = level.offset;
            source = TableRef::derived(statement.clone(), format!("t_d{}", index));
        }
        statement
    }

    fn render(&self, clauses: impl Fn(&NestedLevel) -> (String, String)) -> String {
        let mut source = self.table.clone();
        let mut sql = String::new();
        for (index, level) in self.levels.iter().enumerate() {
            let (header, trailer) = clauses(level);
            let distinct = if level.distinct { " DISTINCT" } else { "" };
            sql = format!(
                "SELECT{}{} {} FROM {}{}",
                distinct, header, level.column, source, trailer
            );
            source = format!("({}) t_d{}", sql, index);
        }
        sql
    }
}

/// Column name that is never a keyword
pub fn column_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}".prop_map(|name| format!("c_{}", name))
}

/// Table name that is never a keyword
pub fn table_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}".prop_map(|name| format!("t_{}", name))
}

fn level() -> impl Strategy<Value = NestedLevel> {
    (
        any::<bool>(),
        column_name(),
        option::of(0u64..10_000),
        option::of(0u64..10_000),
    )
        .prop_map(|(distinct, column, limit, offset)| NestedLevel {
            distinct,
            column,
            limit,
            offset,
        })
}

/// Body of a single-quoted literal, possibly spelling keywords and parens
pub fn literal_body() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 ,()]{0,24}",
        Just("LIMIT 5 OFFSET 2".to_string()),
        Just("(( limit".to_string()),
        Just("offset ))".to_string()),
    ]
}

/// One ORDER BY term, possibly holding commas inside function calls
pub fn order_term() -> impl Strategy<Value = String> {
    let direction = prop_oneof![Just(""), Just(" ASC"), Just(" DESC")];
    let base = prop_oneof![
        column_name(),
        (column_name(), column_name()).prop_map(|(a, b)| format!("COALESCE({}, {})", a, b)),
        (column_name(), column_name(), column_name())
            .prop_map(|(a, b, c)| format!("IFNULL(LEFT({}, 3), {}) || {}", a, b, c)),
    ];
    (base, direction).prop_map(|(base, direction)| format!("{}{}", base, direction))
}
