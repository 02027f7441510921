// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Support
//!
//! Two dialects matter to the rewriter:
//!
//! - **Ansi**: the portable form callers write. Row limiting is expressed with
//!   trailing `LIMIT n OFFSET m` clauses.
//! - **SqlAnywhere**: the target engine. It has no `LIMIT`/`OFFSET`; rows are
//!   limited with leading `TOP n START AT m` tokens, `START AT` is 1-based, and
//!   `ORDER BY` under `DISTINCT` may only reference projected columns.
//!
//! ## Dialect Extensions
//!
//! - `LimitOffset`: trailing `LIMIT ... OFFSET ...`
//! - `TopStartAt`: leading `TOP n START AT m`
//! - `DistinctOrderByOutsideProjection`: `ORDER BY` on columns missing from a
//!   `DISTINCT` projection list

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Dialect {
    /// Generic ANSI-flavored SQL with `LIMIT`/`OFFSET`
    Ansi,
    /// SAP SQL Anywhere
    SqlAnywhere,
}

impl Dialect {
    /// Check if this dialect supports a specific extension
    pub fn supports(&self, ext: DialectExtensions) -> bool {
        match self {
            Dialect::Ansi => matches!(
                ext,
                DialectExtensions::LimitOffset | DialectExtensions::DistinctOrderByOutsideProjection
            ),
            Dialect::SqlAnywhere => matches!(ext, DialectExtensions::TopStartAt),
        }
    }

    /// Canonical lowercase name, as accepted by [`Dialect::from_str`]
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Ansi => "ansi",
            Dialect::SqlAnywhere => "sqlanywhere",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dialect name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}', expected 'ansi' or 'sqlanywhere'")]
pub struct ParseDialectError(pub String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" | "generic" => Ok(Dialect::Ansi),
            "sqlanywhere" | "sqla" => Ok(Dialect::SqlAnywhere),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}

/// Dialect-specific syntax features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DialectExtensions {
    /// Trailing `LIMIT n OFFSET m`
    LimitOffset,

    /// Leading `TOP n START AT m`
    TopStartAt,

    /// `SELECT DISTINCT a ... ORDER BY b` where `b` is not projected
    DistinctOrderByOutsideProjection,
}
