// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Raw-Text Limit/Offset Rewriter
//!
//! Fallback path for callers that only hold finished SQL text. Prefer the
//! structured path ([`crate::emit`]) whenever a statement tree is available.
//!
//! The rewriter recursively walks every parenthesized span, rewrites it on
//! its own, and then matches the remaining outer clause against
//!
//! ```text
//! SELECT [DISTINCT] <columns> [LIMIT <n>] [OFFSET <m>]
//! ```
//!
//! which is re-emitted as
//!
//! ```text
//! SELECT [DISTINCT] [TOP <n>] [START AT <m + 1>] <columns>
//! ```
//!
//! Text that does not have that shape (DDL, `INSERT`, `WITH ...`) is passed
//! through unchanged. Quoted text never takes part in splitting or matching.

use tracing::{debug, trace};

use crate::config::RewriteConfig;
use crate::context::RewriteContext;
use crate::emit::sqlanywhere::start_at_row;
use crate::error::{RewriteError, RewriteResult};
use crate::scanner::Scanner;

/// What the raw rewriter did to the outermost clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteStatus {
    /// No `LIMIT`/`OFFSET` keyword anywhere in the text
    Unchanged,
    /// Limit/offset clauses were moved into `TOP`/`START AT`, or only
    /// subqueries needed rewriting
    Rewritten,
    /// The outer clause has a top-level keyword but not the SELECT shape.
    /// Holds the [`RewriteError::UnsupportedShape`] describing why.
    PassedThrough(RewriteError),
}

/// Rewritten text together with its [`RewriteStatus`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub sql: String,
    pub status: RewriteStatus,
}

/// Rewrite `LIMIT`/`OFFSET` into `TOP`/`START AT` with the default config
pub fn rewrite_sql(sql: &str) -> RewriteResult<String> {
    rewrite_sql_with_config(sql, &RewriteConfig::default())
}

/// Rewrite `LIMIT`/`OFFSET` into `TOP`/`START AT`
pub fn rewrite_sql_with_config(sql: &str, config: &RewriteConfig) -> RewriteResult<String> {
    rewrite_sql_with_outcome(sql, config).map(|outcome| outcome.sql)
}

/// Rewrite and report what happened to the outermost clause
pub fn rewrite_sql_with_outcome(sql: &str, config: &RewriteConfig) -> RewriteResult<RewriteOutcome> {
    let mut ctx = RewriteContext::new(config.clone());
    rewrite_level(&mut ctx, sql)
}

/// True when `sql` contains `LIMIT` or `OFFSET` as a whole word, in any case
pub fn contains_limit_or_offset(sql: &str) -> bool {
    sql.split(|c: char| !is_word_char(c))
        .any(|word| word.eq_ignore_ascii_case("LIMIT") || word.eq_ignore_ascii_case("OFFSET"))
}

/// True when the outer clause asks for `TOP 0`.
///
/// The engine rejects a zero row count, so the execution layer returns an
/// empty result instead of submitting such a statement.
pub fn yields_no_rows(sql: &str) -> bool {
    let Ok(words) = top_level_words(sql) else {
        return false;
    };
    words.windows(2).any(|pair| {
        let (top, count) = (pair[0], pair[1]);
        top.text(sql).eq_ignore_ascii_case("TOP")
            && count.text(sql) == "0"
            && sql[top.end..count.start].chars().all(char::is_whitespace)
    })
}

fn rewrite_level(ctx: &mut RewriteContext, sql: &str) -> RewriteResult<RewriteOutcome> {
    if !contains_limit_or_offset(sql) {
        return Ok(RewriteOutcome {
            sql: sql.to_string(),
            status: RewriteStatus::Unchanged,
        });
    }

    let mut outer = String::with_capacity(sql.len());
    let mut subquery = String::new();
    let mut scanner = Scanner::new(sql);

    for scanned in scanner.by_ref() {
        let scanned = scanned?;
        if scanned.before.nesting_level == 0 {
            outer.push(scanned.ch);
        } else if scanned.closes_group() && scanned.after.nesting_level == 0 {
            ctx.enter_recursive_context()?;
            trace!(depth = ctx.depth(), subquery = %subquery, "rewriting subquery");
            let rewritten = rewrite_level(ctx, &subquery);
            ctx.exit_recursive_context();
            outer.push_str(&rewritten?.sql);
            outer.push(')');
            subquery.clear();
        } else {
            subquery.push(scanned.ch);
        }
    }

    if scanner.state().in_quote() {
        return Err(RewriteError::UnbalancedQuotes {
            position: sql.chars().count(),
        });
    }

    match rewrite_outer(ctx, &outer) {
        Ok(Some(rewritten)) => {
            debug!(from = %sql, to = %rewritten, "moved LIMIT/OFFSET into TOP/START AT");
            Ok(RewriteOutcome {
                sql: rewritten,
                status: RewriteStatus::Rewritten,
            })
        }
        Ok(None) => {
            let status = if outer == sql {
                RewriteStatus::Unchanged
            } else {
                RewriteStatus::Rewritten
            };
            Ok(RewriteOutcome { sql: outer, status })
        }
        Err(err) if !err.is_invalid_statement() => {
            debug!(error = %err, "passing statement through unchanged");
            Ok(RewriteOutcome {
                sql: outer,
                status: RewriteStatus::PassedThrough(err),
            })
        }
        Err(err) => Err(err),
    }
}

/// Match the outer clause and re-emit it.
///
/// `Ok(None)` means there is no top-level `LIMIT`/`OFFSET` to move.
fn rewrite_outer(ctx: &RewriteContext, outer: &str) -> RewriteResult<Option<String>> {
    let words = top_level_words(outer)?;
    let Some(shape) = SelectShape::match_text(outer, &words)? else {
        return Ok(None);
    };

    let limit = shape
        .limit
        .map(str::to_string)
        .or_else(|| match shape.offset {
            Some(_) => ctx.implicit_limit().map(|limit| limit.to_string()),
            None => None,
        });

    let mut parts = vec!["SELECT".to_string()];
    if shape.distinct {
        parts.push("DISTINCT".to_string());
    }
    if let Some(limit) = limit {
        parts.push(format!("TOP {}", limit));
    }
    if let Some(offset) = shape.offset {
        parts.push(format!("START AT {}", start_at_row(offset)?));
    }
    parts.push(shape.columns.to_string());

    Ok(Some(format!("{}{}", shape.leading, parts.join(" "))))
}

/// The pieces of `SELECT [DISTINCT] <columns> [LIMIT n] [OFFSET m]`
#[derive(Debug)]
struct SelectShape<'a> {
    leading: &'a str,
    distinct: bool,
    columns: &'a str,
    limit: Option<&'a str>,
    offset: Option<u64>,
}

impl<'a> SelectShape<'a> {
    fn match_text(text: &'a str, words: &[Word]) -> RewriteResult<Option<Self>> {
        let keyword_at = |word: &Word, keyword: &str| word.text(text).eq_ignore_ascii_case(keyword);

        let Some(first_clause) = words
            .iter()
            .position(|w| keyword_at(w, "LIMIT") || keyword_at(w, "OFFSET"))
        else {
            return Ok(None);
        };

        let body_start = text.len() - text.trim_start().len();
        let select = match words.first() {
            Some(word) if word.start == body_start && keyword_at(word, "SELECT") => *word,
            _ => return Err(unsupported("outer clause is not a SELECT")),
        };

        let mut header_end = select.end;
        let mut distinct = false;
        if let Some(word) = words.get(1) {
            if keyword_at(word, "DISTINCT") && is_blank(&text[select.end..word.start]) {
                distinct = true;
                header_end = word.end;
            }
        }

        let columns_word = words.iter().find(|w| w.start >= header_end);
        if columns_word.is_some_and(|w| keyword_at(w, "TOP") || keyword_at(w, "FIRST")) {
            return Err(unsupported("SELECT already carries a row limitation"));
        }

        let clause_start = words[first_clause].start;
        let columns = text[header_end..clause_start].trim();
        if columns.is_empty() {
            return Err(unsupported("SELECT has no columns before LIMIT/OFFSET"));
        }

        let mut limit = None;
        let mut offset = None;
        let clauses = &words[first_clause..];
        let keywords: Vec<usize> = clauses
            .iter()
            .enumerate()
            .filter(|(_, w)| keyword_at(*w, "LIMIT") || keyword_at(*w, "OFFSET"))
            .map(|(i, _)| i)
            .collect();

        for (n, &i) in keywords.iter().enumerate() {
            let keyword = clauses[i];
            let value_end = keywords
                .get(n + 1)
                .map(|&next| clauses[next].start)
                .unwrap_or(text.len());
            let value = text[keyword.end..value_end].trim();
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(unsupported(format!(
                    "cannot read the value of {}",
                    keyword.text(text).to_ascii_uppercase()
                )));
            }

            if keyword_at(&keyword, "LIMIT") {
                if limit.replace(value).is_some() {
                    return Err(unsupported("LIMIT appears twice"));
                }
            } else {
                let rows = value
                    .parse::<u64>()
                    .map_err(|_| unsupported(format!("OFFSET value '{}' is not a row count", value)))?;
                if offset.replace(rows).is_some() {
                    return Err(unsupported("OFFSET appears twice"));
                }
            }
        }

        Ok(Some(Self {
            leading: &text[..body_start],
            distinct,
            columns,
            limit,
            offset,
        }))
    }
}

fn unsupported(reason: impl Into<String>) -> RewriteError {
    RewriteError::UnsupportedShape {
        reason: reason.into(),
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte range of an unquoted word at nesting level zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Word {
    start: usize,
    end: usize,
}

impl Word {
    fn text<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.start..self.end]
    }
}

fn top_level_words(sql: &str) -> RewriteResult<Vec<Word>> {
    let mut words = Vec::new();
    let mut start = None;

    for scanned in Scanner::new(sql) {
        let scanned = scanned?;
        let in_word = scanned.is_top_level() && is_word_char(scanned.ch);
        match (in_word, start) {
            (true, None) => start = Some(scanned.byte_offset),
            (false, Some(begin)) => {
                words.push(Word {
                    start: begin,
                    end: scanned.byte_offset,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        words.push(Word {
            start: begin,
            end: sql.len(),
        });
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_is_identity() {
        let sql = "SELECT * FROM users WHERE (a = 1";
        assert_eq!(rewrite_sql(sql).unwrap(), sql);
    }

    #[test]
    fn test_limit() {
        assert_eq!(
            rewrite_sql("SELECT * FROM users LIMIT 10").unwrap(),
            "SELECT TOP 10 * FROM users"
        );
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(
            rewrite_sql("SELECT id, name FROM users LIMIT 10 OFFSET 20").unwrap(),
            "SELECT TOP 10 START AT 21 id, name FROM users"
        );
    }

    #[test]
    fn test_offset_only_uses_implicit_limit() {
        assert_eq!(
            rewrite_sql("SELECT * FROM users OFFSET 5").unwrap(),
            "SELECT TOP 1000000 START AT 6 * FROM users"
        );

        let config = RewriteConfig::default().with_implicit_limit(None);
        assert_eq!(
            rewrite_sql_with_config("SELECT * FROM users OFFSET 5", &config).unwrap(),
            "SELECT START AT 6 * FROM users"
        );
    }

    #[test]
    fn test_distinct_keeps_its_place() {
        assert_eq!(
            rewrite_sql("select distinct name from users limit 3").unwrap(),
            "SELECT DISTINCT TOP 3 name from users"
        );
    }

    #[test]
    fn test_offset_before_limit() {
        assert_eq!(
            rewrite_sql("SELECT * FROM t OFFSET 2 LIMIT 4").unwrap(),
            "SELECT TOP 4 START AT 3 * FROM t"
        );
    }

    #[test]
    fn test_subquery_only() {
        assert_eq!(
            rewrite_sql("SELECT * FROM (SELECT id FROM t LIMIT 1) x").unwrap(),
            "SELECT * FROM (SELECT TOP 1 id FROM t) x"
        );
    }

    #[test]
    fn test_subquery_with_leading_whitespace() {
        assert_eq!(
            rewrite_sql("SELECT * FROM ( SELECT id FROM t LIMIT 1 ) x").unwrap(),
            "SELECT * FROM ( SELECT TOP 1 id FROM t) x"
        );
    }

    #[test]
    fn test_empty_parens_roundtrip() {
        assert_eq!(
            rewrite_sql("SELECT NOW() FROM t LIMIT 1").unwrap(),
            "SELECT TOP 1 NOW() FROM t"
        );
    }

    #[test]
    fn test_quoted_keyword_is_not_rewritten() {
        let sql = "SELECT 'OFFSET 5' FROM t";
        let outcome = rewrite_sql_with_outcome(sql, &RewriteConfig::default()).unwrap();
        assert_eq!(outcome.sql, sql);
    }

    #[test]
    fn test_non_select_passes_through() {
        let sql = "DELETE FROM t WHERE id IN (SELECT id FROM t LIMIT 5) AND note = 'x' LIMIT 1";
        let outcome = rewrite_sql_with_outcome(sql, &RewriteConfig::default()).unwrap();
        assert_eq!(
            outcome.sql,
            "DELETE FROM t WHERE id IN (SELECT TOP 5 id FROM t) AND note = 'x' LIMIT 1"
        );
        assert!(matches!(
            outcome.status,
            RewriteStatus::PassedThrough(RewriteError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_non_numeric_offset_passes_through() {
        let sql = "SELECT * FROM t LIMIT 1 OFFSET ?";
        assert_eq!(rewrite_sql(sql).unwrap(), sql);
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(
            rewrite_sql("SELECT * FROM (a LIMIT 1").unwrap_err(),
            RewriteError::MalformedParens { position: 14 }
        );
        assert!(matches!(
            rewrite_sql("SELECT 'abc FROM t LIMIT 1").unwrap_err(),
            RewriteError::UnbalancedQuotes { .. }
        ));
        assert!(matches!(
            rewrite_sql("SELECT a) FROM t LIMIT 1").unwrap_err(),
            RewriteError::MalformedParens { .. }
        ));
    }

    #[test]
    fn test_depth_guard() {
        let sql = "SELECT * FROM (SELECT * FROM (SELECT * FROM t LIMIT 1) a) b";
        let config = RewriteConfig::default().with_max_depth(1);
        assert_eq!(
            rewrite_sql_with_config(sql, &config).unwrap_err(),
            RewriteError::RewriteTooDeep { depth: 2, limit: 1 }
        );
        assert!(rewrite_sql_with_config(sql, &config.with_max_depth(2)).is_ok());
    }

    #[test]
    fn test_contains_limit_or_offset() {
        assert!(contains_limit_or_offset("select * from t limit 1"));
        assert!(!contains_limit_or_offset("SELECT rate_limit, offsets FROM t"));
    }

    #[test]
    fn test_yields_no_rows() {
        assert!(yields_no_rows("SELECT TOP 0 * FROM t"));
        assert!(!yields_no_rows("SELECT TOP 10 * FROM t"));
        assert!(!yields_no_rows("SELECT 'TOP 0' FROM t"));
    }
}
