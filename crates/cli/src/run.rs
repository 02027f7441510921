// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::fs;
use std::io::Read;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use sqlany_dialect_ir::{DialectExtensions, SelectStatement};
use sqlany_dialect_rewrite::{
    Emitter, ErrorSeverity, RewriteConfig, RewriteError, RewriteStatus, emitter_for,
    rewrite_sql_with_outcome, yields_no_rows,
};
use tracing::{Level, debug, error, info, warn};

use crate::cli::Cli;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let input = read_input(&cli.input, std::io::stdin())?;
    let sql = execute(&cli, &config, &input)?;
    println!("{}", sql);
    Ok(())
}

/// Configuration file (if any) with command-line overrides applied
pub fn load_config(cli: &Cli) -> Result<RewriteConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("config {} is not valid JSON", path.display()))?;
            RewriteConfig::from_json(&value)?
        }
        None => RewriteConfig::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    config.validate()?;
    debug!(?config, "loaded rewrite configuration");
    Ok(config)
}

/// The argument itself, or all of `stdin` when the argument is `-`
pub fn read_input(arg: &str, mut stdin: impl Read) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .context("failed to read input from stdin")?;
    Ok(input.trim_end().to_string())
}

/// Rewrite `input` according to the command-line mode
pub fn execute(cli: &Cli, config: &RewriteConfig, input: &str) -> Result<String> {
    let sql = if cli.tree {
        let statement: SelectStatement =
            serde_json::from_str(input).context("input is not a JSON statement tree")?;
        emitter_for(cli.dialect, config.clone())
            .emit(&statement)
            .inspect_err(|err| {
                report(err);
            })
            .context("failed to emit statement")?
    } else {
        ensure!(
            cli.dialect.supports(DialectExtensions::TopStartAt),
            "raw SQL can only be rewritten for a TOP/START AT dialect; use --tree for {}",
            cli.dialect
        );
        let outcome = rewrite_sql_with_outcome(input, config)
            .inspect_err(|err| {
                report(err);
            })
            .context("failed to rewrite SQL")?;
        match &outcome.status {
            RewriteStatus::Unchanged => info!("no LIMIT/OFFSET to rewrite"),
            RewriteStatus::Rewritten => info!("rewrote LIMIT/OFFSET"),
            RewriteStatus::PassedThrough(reason) => {
                report(reason);
            }
        }
        outcome.sql
    };

    if yields_no_rows(&sql) {
        warn!("statement selects TOP 0 and returns no rows");
    }
    Ok(sql)
}

/// Log a rewrite error at the level its severity calls for
pub fn report(err: &RewriteError) -> Level {
    match err.severity() {
        ErrorSeverity::Info => {
            info!(reason = %err, "statement passed through");
            Level::INFO
        }
        ErrorSeverity::Error => {
            error!(%err, "statement rejected");
            Level::ERROR
        }
    }
}
