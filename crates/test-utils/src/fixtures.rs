// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: SQL text with its expected SQL Anywhere rewrite, and
//! statement trees for the structured path

use sqlany_dialect_ir::{
    BinaryOp, Expr, Literal, Lock, OrderBy, SelectCore, SelectItem, SelectStatement, TableRef,
};

/// Input text and the text the raw rewriter should produce for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteCase {
    pub name: &'static str,
    pub input: &'static str,
    pub expected: &'static str,
}

/// Sample SQL queries for testing
pub struct SqlFixtures;

impl SqlFixtures {
    // ===== Plain SELECT queries =====

    /// SELECT without any row limitation
    pub const fn simple_select() -> &'static str {
        "SELECT id, email, name FROM users"
    }

    /// Keyword spelled inside a string literal only
    pub const fn quoted_limit() -> &'static str {
        "SELECT * FROM notes WHERE body = 'LIMIT 5 OFFSET 2'"
    }

    /// Keyword spelled as part of an identifier only
    pub const fn limit_in_identifier() -> &'static str {
        "SELECT rate_limit, offsets FROM quotas"
    }

    // ===== Statements the rewriter leaves alone =====

    pub const fn insert_with_limit() -> &'static str {
        "INSERT INTO archive SELECT * FROM events LIMIT 10"
    }

    pub const fn select_with_top() -> &'static str {
        "SELECT TOP 5 * FROM users LIMIT 10"
    }

    // ===== Malformed input =====

    pub const fn unbalanced_quote() -> &'static str {
        "SELECT * FROM t WHERE name = 'abc LIMIT 1"
    }

    pub const fn unclosed_paren() -> &'static str {
        "SELECT * FROM (SELECT * FROM t LIMIT 1"
    }

    pub const fn stray_close_paren() -> &'static str {
        "SELECT * FROM t) LIMIT 1"
    }

    /// Nested `depth` levels deep, each level carrying `LIMIT 1`
    pub fn nested_limits(depth: usize) -> String {
        let mut sql = "SELECT * FROM t LIMIT 1".to_string();
        for level in 0..depth {
            sql = format!("SELECT * FROM ({}) t{} LIMIT 1", sql, level);
        }
        sql
    }

    /// Raw rewriter cases with their expected output
    pub fn rewrite_cases() -> Vec<RewriteCase> {
        vec![
            RewriteCase {
                name: "limit",
                input: "SELECT * FROM users LIMIT 10",
                expected: "SELECT TOP 10 * FROM users",
            },
            RewriteCase {
                name: "limit_offset",
                input: "SELECT id, name FROM users LIMIT 10 OFFSET 20",
                expected: "SELECT TOP 10 START AT 21 id, name FROM users",
            },
            RewriteCase {
                name: "offset_only",
                input: "SELECT * FROM users OFFSET 5",
                expected: "SELECT TOP 1000000 START AT 6 * FROM users",
            },
            RewriteCase {
                name: "distinct",
                input: "SELECT DISTINCT country FROM users LIMIT 3",
                expected: "SELECT DISTINCT TOP 3 country FROM users",
            },
            RewriteCase {
                name: "ordered",
                input: "SELECT * FROM users WHERE active = 1 ORDER BY name LIMIT 5",
                expected: "SELECT TOP 5 * FROM users WHERE active = 1 ORDER BY name",
            },
            RewriteCase {
                name: "derived_table",
                input: "SELECT * FROM (SELECT id FROM users LIMIT 2) u",
                expected: "SELECT * FROM (SELECT TOP 2 id FROM users) u",
            },
            RewriteCase {
                name: "both_levels",
                input: "SELECT * FROM (SELECT id FROM users LIMIT 2 OFFSET 1) u LIMIT 1",
                expected: "SELECT TOP 1 * FROM (SELECT TOP 2 START AT 2 id FROM users) u",
            },
            RewriteCase {
                name: "in_predicate",
                input: "SELECT name FROM users WHERE id IN (SELECT user_id FROM orders LIMIT 3)",
                expected: "SELECT name FROM users WHERE id IN (SELECT TOP 3 user_id FROM orders)",
            },
            RewriteCase {
                name: "quoted_keyword_kept",
                input: "SELECT 'LIMIT 9' AS label FROM t LIMIT 1",
                expected: "SELECT TOP 1 'LIMIT 9' AS label FROM t",
            },
            RewriteCase {
                name: "lowercase",
                input: "select * from users limit 4 offset 0",
                expected: "SELECT TOP 4 START AT 1 * from users",
            },
        ]
    }
}

/// Statement trees for the structured path
pub struct StatementFixtures;

impl StatementFixtures {
    /// `SELECT id, name FROM users ORDER BY name` paged by `limit`/`offset`
    pub fn users_page(limit: u64, offset: u64) -> SelectStatement {
        SelectStatement::new()
            .with_core(
                SelectCore::new()
                    .with_projection(Expr::column("id"))
                    .with_projection(Expr::column("name"))
                    .with_from(TableRef::table("users")),
            )
            .with_order(OrderBy::asc(Expr::column("name")))
            .with_limit(limit)
            .with_offset(offset)
    }

    /// `SELECT DISTINCT a, b FROM t ORDER BY c DESC LIMIT 5 OFFSET 10`
    pub fn distinct_ordered() -> SelectStatement {
        SelectStatement::new()
            .with_core(
                SelectCore::new()
                    .distinct()
                    .with_projection(Expr::column("a"))
                    .with_projection(Expr::column("b"))
                    .with_from(TableRef::table("t")),
            )
            .with_order(OrderBy::desc(Expr::column("c")))
            .with_limit(5)
            .with_offset(10)
    }

    /// Filtered statement with a boolean predicate and a lock
    pub fn active_users_for_update() -> SelectStatement {
        SelectStatement::new()
            .with_core(
                SelectCore::new()
                    .with_projection(Expr::column("id"))
                    .with_from(TableRef::table("users"))
                    .with_where(Expr::binary(
                        Expr::column("active"),
                        BinaryOp::Eq,
                        Expr::Literal(Literal::Boolean(true)),
                    )),
            )
            .with_limit(1)
            .with_lock(Lock::ForUpdate)
    }

    /// Derived tables nested `depth` levels deep, each with `LIMIT 1`
    pub fn nested(depth: usize) -> SelectStatement {
        let leaf = SelectStatement::new()
            .with_core(
                SelectCore::new()
                    .with_item(SelectItem::Wildcard)
                    .with_from(TableRef::table("t")),
            )
            .with_limit(1);

        (0..depth).fold(leaf, |inner, level| {
            SelectStatement::new()
                .with_core(
                    SelectCore::new()
                        .with_item(SelectItem::Wildcard)
                        .with_from(TableRef::derived(inner, format!("t{}", level))),
                )
                .with_limit(1)
        })
    }
}
