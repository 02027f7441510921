// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use sqlany_dialect_ir::Dialect;

#[derive(Debug, Parser)]
#[command(name = "sqlany-rewrite")]
#[command(about = "Rewrite LIMIT/OFFSET and DISTINCT/ORDER BY for SQL Anywhere")]
pub struct Cli {
    /// SQL text, or a JSON statement tree with --tree. Use '-' to read from stdin.
    pub input: String,

    /// Treat the input as a JSON-serialized statement tree
    #[arg(long)]
    pub tree: bool,

    /// Target dialect for --tree output
    #[arg(long, default_value_t = Dialect::SqlAnywhere)]
    pub dialect: Dialect,

    /// JSON rewrite configuration file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Maximum subquery nesting, overriding the configuration file
    #[arg(long)]
    pub max_depth: Option<usize>,
}
