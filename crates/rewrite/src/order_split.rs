// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Order-List Splitter
//!
//! Splits a rendered, comma-joined ORDER BY list into single order
//! expressions. Commas inside parentheses (function arguments) do not split.
//!
//! Only parentheses are counted, not quotes: the input is order text that the
//! emitter rendered, not user SQL, so string literals holding commas inside
//! unbalanced parentheses are not expected here.

/// Split `order_list` on commas that are outside every parenthesis.
///
/// Pieces are trimmed and blank pieces are dropped.
///
/// ```rust
/// use sqlany_dialect_rewrite::split_order_list;
///
/// assert_eq!(split_order_list("FOO(a,b), c DESC"), vec!["FOO(a,b)", "c DESC"]);
/// ```
pub fn split_order_list(order_list: &str) -> Vec<String> {
    let mut orders = Vec::new();
    let mut current = String::new();
    let mut pending = false;

    for part in order_list.split(',') {
        if pending {
            current.push(',');
        }
        current.push_str(part);
        pending = true;

        if current.matches('(').count() == current.matches(')').count() {
            push_order(&mut orders, &current);
            current.clear();
            pending = false;
        }
    }
    if pending {
        push_order(&mut orders, &current);
    }

    orders
}

fn push_order(orders: &mut Vec<String>, order: &str) {
    let order = order.trim();
    if !order.is_empty() {
        orders.push(order.to_string());
    }
}
