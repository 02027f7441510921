// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlany-rewrite
//!
//! Rewrites portable SQL for SQL Anywhere from the command line.
//!
//! ```text
//! sqlany-rewrite "SELECT * FROM users LIMIT 10 OFFSET 20"
//! echo '{"cores": [...], "limit": 5}' | sqlany-rewrite --tree -
//! ```

pub mod cli;
pub mod run;

pub use cli::Cli;
pub use run::{execute, load_config, read_input, report, run};
