// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Distinct/Order Aliasing
//!
//! SQL Anywhere rejects `SELECT DISTINCT a, b ... ORDER BY c` when `c` is not
//! projected. The rewrite computes each order value as a window function over
//! the distinct columns, projects it under a synthetic alias, and orders by
//! the alias instead:
//!
//! ```sql
//! -- before
//! SELECT DISTINCT a, b FROM t ORDER BY c DESC
//! -- after
//! SELECT DISTINCT a, b,
//!        FIRST_VALUE(c) OVER (PARTITION BY a, b ORDER BY c DESC) AS alias_0__
//! FROM t ORDER BY alias_0__ DESC
//! ```
//!
//! The rewrite applies whenever a DISTINCT marker and at least one order
//! expression are both present, whether or not the order expressions are
//! already projected.

use std::borrow::Cow;

use sqlany_dialect_ir::{Expr, OrderBy, SelectItem, SelectStatement};
use tracing::debug;

use crate::context::RewriteContext;
use crate::emit::EmitterBase;
use crate::error::RewriteResult;
use crate::order_split::split_order_list;

/// Name of the projection alias for the order expression at `index`
pub fn alias_name(index: usize) -> String {
    format!("alias_{}__", index)
}

/// True when the order expression sorts descending, in any case
pub fn is_descending(order: &str) -> bool {
    OrderTerm::parse(order).descending
}

/// The ordered value of an order expression, without its trailing
/// `COLLATE`, `ASC`/`DESC` and `NULLS FIRST`/`NULLS LAST` modifiers
pub fn order_base(order: &str) -> &str {
    OrderTerm::parse(order).base
}

/// One order expression split into its value and trailing modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrderTerm<'a> {
    base: &'a str,
    descending: bool,
    nulls: Option<&'static str>,
}

impl<'a> OrderTerm<'a> {
    /// Strip `[COLLATE name] [ASC|DESC] [NULLS FIRST|LAST]` from the end
    fn parse(order: &'a str) -> Self {
        let mut base = order.trim();

        let mut nulls = None;
        if let Some((head, placement)) = split_last_word(base) {
            if let Some((rest, keyword)) = split_last_word(head) {
                if keyword.eq_ignore_ascii_case("NULLS") {
                    if placement.eq_ignore_ascii_case("FIRST") {
                        nulls = Some("NULLS FIRST");
                        base = rest;
                    } else if placement.eq_ignore_ascii_case("LAST") {
                        nulls = Some("NULLS LAST");
                        base = rest;
                    }
                }
            }
        }

        let mut descending = false;
        if let Some((head, direction)) = split_last_word(base) {
            if direction.eq_ignore_ascii_case("DESC") || direction.eq_ignore_ascii_case("ASC") {
                descending = direction.eq_ignore_ascii_case("DESC");
                base = head;
            }
        }

        if let Some((head, _collation)) = split_last_word(base) {
            if let Some((rest, keyword)) = split_last_word(head) {
                if keyword.eq_ignore_ascii_case("COLLATE") {
                    base = rest;
                }
            }
        }

        OrderTerm {
            base,
            descending,
            nulls,
        }
    }

    /// The alias ordered the same way: `alias [DESC] [NULLS FIRST|LAST]`
    fn alias_order(&self, index: usize) -> String {
        let mut order = alias_name(index);
        if self.descending {
            order.push_str(" DESC");
        }
        if let Some(nulls) = self.nulls {
            order.push(' ');
            order.push_str(nulls);
        }
        order
    }
}

/// `(text before the last word, last word)`, both trimmed
fn split_last_word(text: &str) -> Option<(&str, &str)> {
    text.trim_end()
        .rsplit_once(char::is_whitespace)
        .map(|(head, last)| (head.trim_end(), last))
        .filter(|(head, _)| !head.is_empty())
}

fn window_projection(order: &str, partition_by: &str) -> String {
    format!(
        "FIRST_VALUE({}) OVER (PARTITION BY {} ORDER BY {})",
        order_base(order),
        partition_by,
        order
    )
}

fn alias_order(index: usize, order: &str) -> String {
    OrderTerm::parse(order).alias_order(index)
}

/// Apply windowed aliasing to a statement.
///
/// Returns the statement unchanged (borrowed) when it is not DISTINCT or has
/// no order. Otherwise returns a derived statement: every DISTINCT core gains
/// one aliased `FIRST_VALUE` projection per atomic order expression, and the
/// order list is replaced by the aliases. The input is never modified.
pub fn alias_distinct_orders<'s, E>(
    emitter: &E,
    ctx: &mut RewriteContext,
    statement: &'s SelectStatement,
) -> RewriteResult<Cow<'s, SelectStatement>>
where
    E: EmitterBase + ?Sized,
{
    if statement.orders.is_empty() || !statement.is_distinct() {
        return Ok(Cow::Borrowed(statement));
    }

    let mut orders = Vec::new();
    for order in &statement.orders {
        let rendered = emitter.render_order(ctx, order)?;
        orders.extend(split_order_list(&rendered));
    }
    debug!(count = orders.len(), "aliasing ORDER BY under DISTINCT");

    let mut aliased = statement.clone();
    for core in aliased.cores.iter_mut().filter(|core| core.distinct) {
        let partition_by = emitter.render_projections(ctx, &core.projections)?;
        for (index, order) in orders.iter().enumerate() {
            core.projections.push(SelectItem::AliasedExpr {
                expr: Expr::Raw(window_projection(order, &partition_by)),
                alias: alias_name(index),
            });
        }
    }

    aliased.orders = orders
        .iter()
        .enumerate()
        .map(|(index, order)| OrderBy::new(Expr::Raw(alias_order(index, order))))
        .collect();

    Ok(Cow::Owned(aliased))
}

/// Text form of the aliased DISTINCT projection list.
///
/// For callers that assemble SQL as strings: returns `DISTINCT <columns>`
/// followed by one aliased `FIRST_VALUE` projection per order expression.
///
/// ```rust
/// use sqlany_dialect_rewrite::distinct_projection;
///
/// assert_eq!(
///     distinct_projection("a, b", "c DESC"),
///     "DISTINCT a, b, FIRST_VALUE(c) OVER (PARTITION BY a, b ORDER BY c DESC) AS alias_0__"
/// );
/// ```
pub fn distinct_projection(columns: &str, order_by: &str) -> String {
    let orders = split_order_list(order_by);
    if orders.is_empty() {
        return format!("DISTINCT {}", columns);
    }

    let windows: Vec<String> = orders
        .iter()
        .enumerate()
        .map(|(index, order)| {
            format!(
                "{} AS {}",
                window_projection(order, columns),
                alias_name(index)
            )
        })
        .collect();
    format!("DISTINCT {}, {}", columns, windows.join(", "))
}

/// Text form of the aliased ORDER BY clause; `None` when `order_by` is blank.
///
/// Companion of [`distinct_projection`] for the same `order_by` text.
pub fn alias_order_clause(order_by: &str) -> Option<String> {
    let orders = split_order_list(order_by);
    if orders.is_empty() {
        return None;
    }

    let aliases: Vec<String> = orders
        .iter()
        .enumerate()
        .map(|(index, order)| alias_order(index, order))
        .collect();
    Some(format!("ORDER BY {}", aliases.join(", ")))
}
