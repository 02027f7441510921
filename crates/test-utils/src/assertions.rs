// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQL-specific test helpers and custom assertions

/// Custom assertion helpers for SQL testing
pub struct SqlAssertions;

impl SqlAssertions {
    /// Collapse runs of whitespace to a single space and trim
    pub fn normalize(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Assert two SQL strings are equal up to whitespace
    pub fn assert_same_sql(actual: &str, expected: &str) {
        assert_eq!(
            Self::normalize(actual),
            Self::normalize(expected),
            "SQL mismatch\n  actual:   {}\n  expected: {}",
            actual,
            expected
        );
    }

    /// Assert no unquoted `LIMIT`/`OFFSET` word remains
    pub fn assert_no_limit_offset(sql: &str) {
        let mut in_quote = None;
        let mut word = String::new();
        for ch in sql.chars().chain(std::iter::once(' ')) {
            match (in_quote, ch) {
                (None, '\'' | '"') => in_quote = Some(ch),
                (Some(open), _) if open == ch => in_quote = None,
                (None, c) if c.is_alphanumeric() || c == '_' => {
                    word.push(c);
                    continue;
                }
                _ => {}
            }
            assert!(
                !word.eq_ignore_ascii_case("LIMIT") && !word.eq_ignore_ascii_case("OFFSET"),
                "Found '{}' in rewritten SQL: {}",
                word,
                sql
            );
            word.clear();
        }
    }

    /// Assert the SQL orders by `alias_0__ .. alias_{count-1}__` and projects each alias
    pub fn assert_aliased_order(sql: &str, count: usize) {
        for index in 0..count {
            let alias = format!("alias_{}__", index);
            assert!(
                sql.contains(&format!("AS {}", alias)),
                "Missing projection for {} in: {}",
                alias,
                sql
            );
        }
        let order = sql
            .rsplit_once("ORDER BY ")
            .map(|(_, order)| order)
            .unwrap_or_else(|| panic!("No ORDER BY in: {}", sql));
        assert!(
            order.starts_with("alias_0__"),
            "ORDER BY does not use aliases: {}",
            sql
        );
    }
}
