// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the command-line front end

use std::io::Cursor;

use clap::Parser;
use sqlany_dialect_cli::{Cli, execute, load_config, read_input, report};
use sqlany_dialect_rewrite::{RewriteConfig, RewriteError};
use sqlany_dialect_test_utils::{StatementFixtures, init_test_tracing};
use tracing::Level;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["sqlany-rewrite"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_raw_rewrite() {
    init_test_tracing();

    let cli = parse(&["SELECT * FROM users LIMIT 10 OFFSET 20"]);
    let config = load_config(&cli).unwrap();
    assert_eq!(
        execute(&cli, &config, &cli.input).unwrap(),
        "SELECT TOP 10 START AT 21 * FROM users"
    );
}

#[test]
fn test_raw_passthrough_succeeds() {
    let cli = parse(&["INSERT INTO a SELECT * FROM b LIMIT 1"]);
    let config = load_config(&cli).unwrap();
    assert_eq!(execute(&cli, &config, &cli.input).unwrap(), cli.input);
}

#[test]
fn test_raw_error_fails() {
    let cli = parse(&["SELECT * FROM (SELECT 1 LIMIT 1"]);
    let config = load_config(&cli).unwrap();
    let err = execute(&cli, &config, &cli.input).unwrap_err();
    assert!(format!("{:#}", err).contains("Braces do not match"));
}

#[test]
fn test_raw_rejects_ansi_target() {
    let cli = parse(&["--dialect", "ansi", "SELECT 1 LIMIT 1"]);
    let config = load_config(&cli).unwrap();
    let err = execute(&cli, &config, &cli.input).unwrap_err();
    assert!(err.to_string().contains("TOP/START AT"));
}

#[test]
fn test_raw_offset_without_start_row_passes_through() {
    let cli = parse(&["SELECT * FROM t LIMIT 1 OFFSET 18446744073709551615"]);
    let config = load_config(&cli).unwrap();
    assert_eq!(execute(&cli, &config, &cli.input).unwrap(), cli.input);
}

#[test]
fn test_report_levels_follow_severity() {
    init_test_tracing();

    let passthrough = RewriteError::UnsupportedShape {
        reason: "UPDATE".to_string(),
    };
    assert_eq!(report(&passthrough), Level::INFO);
    assert_eq!(report(&RewriteError::MalformedParens { position: 4 }), Level::ERROR);
    assert_eq!(
        report(&RewriteError::RewriteTooDeep { depth: 3, limit: 2 }),
        Level::ERROR
    );
}

#[test]
fn test_tree_input() {
    let json = serde_json::to_string(&StatementFixtures::users_page(5, 10)).unwrap();

    let cli = parse(&["--tree", "-"]);
    let input = read_input(&cli.input, Cursor::new(json.clone())).unwrap();
    let config = load_config(&cli).unwrap();
    assert_eq!(
        execute(&cli, &config, &input).unwrap(),
        "SELECT TOP 5 START AT 11 id, name FROM users ORDER BY name ASC"
    );

    let cli = parse(&["--tree", "--dialect", "ansi", "-"]);
    assert_eq!(
        execute(&cli, &config, &json).unwrap(),
        "SELECT id, name FROM users ORDER BY name ASC LIMIT 5 OFFSET 10"
    );
}

#[test]
fn test_tree_depth_override() {
    let json = serde_json::to_string(&StatementFixtures::nested(3)).unwrap();

    let cli = parse(&["--tree", "--max-depth", "2", "-"]);
    let config = load_config(&cli).unwrap();
    assert_eq!(config, RewriteConfig::default().with_max_depth(2));

    let err = execute(&cli, &config, &json).unwrap_err();
    assert!(format!("{:#}", err).contains("nesting too deep"));
}

#[test]
fn test_config_file() {
    let path = std::env::temp_dir().join(format!("sqlany-rewrite-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"implicitLimit": 50}"#).unwrap();

    let cli = parse(&["--config", path.to_str().unwrap(), "SELECT * FROM t OFFSET 3"]);
    let config = load_config(&cli).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.implicit_limit, Some(50));
    assert_eq!(
        execute(&cli, &config, &cli.input).unwrap(),
        "SELECT TOP 50 START AT 4 * FROM t"
    );
}

#[test]
fn test_invalid_overrides() {
    let cli = parse(&["--max-depth", "0", "SELECT 1"]);
    assert!(load_config(&cli).is_err());

    let cli = parse(&["--config", "/nonexistent/sqlany.json", "SELECT 1"]);
    let err = load_config(&cli).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read config"));
}

#[test]
fn test_read_input() {
    assert_eq!(read_input("SELECT 1", Cursor::new("ignored")).unwrap(), "SELECT 1");
    assert_eq!(
        read_input("-", Cursor::new("SELECT 2\n")).unwrap(),
        "SELECT 2"
    );
}
