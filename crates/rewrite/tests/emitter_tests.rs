// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the structured emitters

use sqlany_dialect_ir::{
    BinaryOp, ColumnRef, Dialect, Expr, Literal, OrderBy, SelectCore, SelectStatement, TableRef,
    UnaryOp,
};
use sqlany_dialect_rewrite::{
    AnsiEmitter, Emitter, RewriteConfig, RewriteError, SqlAnywhereEmitter, emitter_for,
    rewrite_sql,
};
use sqlany_dialect_test_utils::{SqlAssertions, StatementFixtures, init_test_tracing};

// =============================================================================
// SQL Anywhere output
// =============================================================================

#[test]
fn test_distinct_order_aliasing() {
    init_test_tracing();

    let sql = SqlAnywhereEmitter::new()
        .emit(&StatementFixtures::distinct_ordered())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT TOP 5 START AT 11 a, b, \
         FIRST_VALUE(c) OVER (PARTITION BY a, b ORDER BY c DESC) AS alias_0__ \
         FROM t ORDER BY alias_0__ DESC"
    );
    SqlAssertions::assert_aliased_order(&sql, 1);
}

#[test]
fn test_paged_statement() {
    let sql = SqlAnywhereEmitter::new()
        .emit(&StatementFixtures::users_page(25, 50))
        .unwrap();
    assert_eq!(
        sql,
        "SELECT TOP 25 START AT 51 id, name FROM users ORDER BY name ASC"
    );
}

#[test]
fn test_booleans_and_lock() {
    let statement = StatementFixtures::active_users_for_update();

    assert_eq!(
        SqlAnywhereEmitter::new().emit(&statement).unwrap(),
        "SELECT TOP 1 id FROM users WHERE active = 1 FOR UPDATE"
    );
    assert_eq!(
        AnsiEmitter::new().emit(&statement).unwrap(),
        "SELECT id FROM users WHERE active = TRUE LIMIT 1 FOR UPDATE"
    );
}

#[test]
fn test_nested_derived_tables() {
    let sql = SqlAnywhereEmitter::new()
        .emit(&StatementFixtures::nested(2))
        .unwrap();
    assert_eq!(
        sql,
        "SELECT TOP 1 * FROM (SELECT TOP 1 * FROM (SELECT TOP 1 * FROM t) t0) t1"
    );
    SqlAssertions::assert_no_limit_offset(&sql);
}

#[test]
fn test_subquery_expression_is_aliased_on_its_own() {
    let inner = SelectStatement::new()
        .with_core(
            SelectCore::new()
                .distinct()
                .with_projection(Expr::column("user_id"))
                .with_from(TableRef::table("orders")),
        )
        .with_order(OrderBy::desc(Expr::column("total")))
        .with_limit(3);
    let statement = SelectStatement::new().with_core(
        SelectCore::new()
            .with_projection(Expr::column("name"))
            .with_from(TableRef::table("users"))
            .with_where(Expr::binary(
                Expr::column("id"),
                BinaryOp::In,
                Expr::subquery(inner),
            )),
    );

    assert_eq!(
        SqlAnywhereEmitter::new().emit(&statement).unwrap(),
        "SELECT name FROM users WHERE id IN (SELECT DISTINCT TOP 3 user_id, \
         FIRST_VALUE(total) OVER (PARTITION BY user_id ORDER BY total DESC) AS alias_0__ \
         FROM orders ORDER BY alias_0__ DESC)"
    );
}

#[test]
fn test_null_placement_survives_aliasing() {
    let statement = SelectStatement::new()
        .with_core(
            SelectCore::new()
                .distinct()
                .with_projection(Expr::column("a"))
                .with_from(TableRef::table("t")),
        )
        .with_order(OrderBy::new(Expr::raw("c NULLS LAST")));

    let sql = SqlAnywhereEmitter::new().emit(&statement).unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT a, \
         FIRST_VALUE(c) OVER (PARTITION BY a ORDER BY c NULLS LAST) AS alias_0__ \
         FROM t ORDER BY alias_0__ NULLS LAST"
    );
    SqlAssertions::assert_aliased_order(&sql, 1);
}

#[test]
fn test_unrepresentable_offset_is_rejected() {
    let last_row = StatementFixtures::users_page(1, u64::MAX - 1);
    assert_eq!(
        SqlAnywhereEmitter::new().emit(&last_row).unwrap(),
        "SELECT TOP 1 START AT 18446744073709551615 id, name FROM users ORDER BY name ASC"
    );

    let past_end = StatementFixtures::users_page(1, u64::MAX);
    assert!(matches!(
        SqlAnywhereEmitter::new().emit(&past_end),
        Err(RewriteError::UnsupportedShape { .. })
    ));
    assert!(AnsiEmitter::new().emit(&past_end).is_ok());
}

#[test]
fn test_every_expression_kind_renders() {
    let exists = SelectStatement::new().with_core(
        SelectCore::new()
            .with_projection(Expr::Literal(Literal::Integer(1)))
            .with_from(TableRef::table("orders")),
    );
    let statement = SelectStatement::new().with_core(
        SelectCore::new()
            .with_projection(Expr::Column(ColumnRef::new("id").with_table("u")))
            .with_projection(Expr::Literal(Literal::Null))
            .with_projection(Expr::Literal(Literal::Float(1.5)))
            .with_projection(Expr::Literal(Literal::String("it's".to_string())))
            .with_projection(Expr::Literal(Literal::Boolean(false)))
            .with_projection(Expr::binary(
                Expr::column("a"),
                BinaryOp::Add,
                Expr::Literal(Literal::Integer(-3)),
            ))
            .with_projection(Expr::UnaryOp {
                op: UnaryOp::Neg,
                expr: Box::new(Expr::column("b")),
            })
            .with_projection(Expr::Function {
                name: "COUNT".to_string(),
                args: vec![Expr::column("id")],
                distinct: true,
            })
            .with_projection(Expr::Cast {
                expr: Box::new(Expr::column("a")),
                type_name: "VARCHAR(10)".to_string(),
            })
            .with_projection(Expr::Paren(Box::new(Expr::binary(
                Expr::column("b"),
                BinaryOp::Mul,
                Expr::Literal(Literal::Integer(2)),
            ))))
            .with_projection(Expr::raw("CURRENT TIMESTAMP"))
            .with_from(TableRef::table("users").with_alias("u"))
            .with_where(Expr::binary(
                Expr::column("id"),
                BinaryOp::In,
                Expr::List(vec![
                    Expr::Literal(Literal::Integer(1)),
                    Expr::Literal(Literal::Integer(2)),
                ]),
            ))
            .with_where(Expr::UnaryOp {
                op: UnaryOp::Not,
                expr: Box::new(Expr::column("deleted")),
            })
            .with_where(Expr::UnaryOp {
                op: UnaryOp::Exists,
                expr: Box::new(Expr::subquery(exists)),
            }),
    );

    let body = "u.id, NULL, 1.5, 'it''s', {false}, a + -3, -b, COUNT(DISTINCT id), \
                CAST(a AS VARCHAR(10)), (b * 2), CURRENT TIMESTAMP FROM users u \
                WHERE id IN (1, 2) AND NOT deleted AND EXISTS (SELECT 1 FROM orders)";
    assert_eq!(
        SqlAnywhereEmitter::new().emit(&statement).unwrap(),
        format!("SELECT {}", body.replace("{false}", "0"))
    );
    assert_eq!(
        AnsiEmitter::new().emit(&statement).unwrap(),
        format!("SELECT {}", body.replace("{false}", "FALSE"))
    );
}

#[test]
fn test_depth_guard() {
    let statement = StatementFixtures::nested(3);

    let shallow = SqlAnywhereEmitter::with_config(RewriteConfig::default().with_max_depth(2));
    assert_eq!(
        shallow.emit(&statement),
        Err(RewriteError::RewriteTooDeep { depth: 3, limit: 2 })
    );

    let enough = SqlAnywhereEmitter::with_config(RewriteConfig::default().with_max_depth(3));
    assert!(enough.emit(&statement).is_ok());
}

// =============================================================================
// Paths and dialects agree
// =============================================================================

#[test]
fn test_structured_matches_raw_path() {
    let statement = StatementFixtures::users_page(10, 0);

    let portable = AnsiEmitter::new().emit(&statement).unwrap();
    assert_eq!(
        portable,
        "SELECT id, name FROM users ORDER BY name ASC LIMIT 10 OFFSET 0"
    );
    assert_eq!(
        rewrite_sql(&portable).unwrap(),
        SqlAnywhereEmitter::new().emit(&statement).unwrap()
    );
}

#[test]
fn test_emitter_for_dialect() {
    let statement = StatementFixtures::users_page(1, 1);
    for dialect in [Dialect::Ansi, Dialect::SqlAnywhere] {
        let emitter = emitter_for(dialect, RewriteConfig::default());
        let sql = emitter.emit(&statement).unwrap();
        assert_eq!(sql.contains("LIMIT"), dialect == Dialect::Ansi);
        assert_eq!(sql.contains("START AT 2"), dialect == Dialect::SqlAnywhere);
    }
}

#[test]
fn test_emitter_for_aliases_only_without_outside_ordering() {
    let statement = StatementFixtures::distinct_ordered();

    let portable = emitter_for(Dialect::Ansi, RewriteConfig::default())
        .emit(&statement)
        .unwrap();
    assert!(!portable.contains("FIRST_VALUE"));
    assert!(portable.ends_with("ORDER BY c DESC LIMIT 5 OFFSET 10"));

    let native = emitter_for(Dialect::SqlAnywhere, RewriteConfig::default())
        .emit(&statement)
        .unwrap();
    SqlAssertions::assert_aliased_order(&native, 1);
}
