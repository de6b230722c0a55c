//! # SQL Query Advisor
//!
//! Structural complexity scoring and performance recommendations for SQL.
//!
//! `sql-query-advisor` scans SQL text without a full grammar: it separates
//! CTEs from the main query, counts joins, aggregations, subquery nesting
//! and selected columns, derives a bounded complexity score, and runs 20
//! independent rules that suggest performance fixes.
//!
//! # Quick Start
//!
//! ```bash
//! # Analyze a script
//! sql-query-advisor analyze -q queries.sql
//!
//! # Inline SQL with metrics
//! sql-query-advisor analyze --sql "SELECT * FROM events" -v
//!
//! # Stream queries from stdin as JSON
//! cat queries.sql | sql-query-advisor analyze -q - -f json
//!
//! # List rules
//! sql-query-advisor rules
//! ```
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | No recommendations, or only informational ones |
//! | 1 | Warnings found |
//! | 2 | Critical recommendations found |
//!
//! Errors (unreadable input, invalid config) are reported on stderr with
//! exit code 1.

use std::{io, process};

use clap::Parser;
use sql_query_advisor::{
    app::{AnalyzeParams, convert_log_level, run_analyze, run_rules, select_input},
    cli::{Cli, Commands, LogLevel},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Install a stderr subscriber; `--log-level` wins over `RUST_LOG`
fn init_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(convert_log_level(level).into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> AppResult<i32> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            queries,
            sql,
            output_format,
            verbose,
            no_color,
            disabled
        } => {
            let params = AnalyzeParams {
                input: select_input(queries, sql)?,
                output_format,
                verbose,
                no_color,
                disabled
            };
            let result = run_analyze(params, config)?;
            println!("{}", result.output);
            Ok(result.exit_code)
        }
        Commands::Rules {
            output_format,
            no_color
        } => {
            print!("{}", run_rules(output_format, no_color, config)?);
            Ok(0)
        }
    }
}
