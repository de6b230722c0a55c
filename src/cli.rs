use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Query Advisor - Score SQL complexity and suggest performance fixes
#[derive(Parser, Debug)]
#[command(name = "sql-query-advisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity written to stderr (overrides RUST_LOG)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze SQL statements
    Analyze {
        /// Path to SQL file (use - for stdin)
        #[arg(short, long, conflicts_with = "sql", required_unless_present = "sql")]
        queries: Option<PathBuf>,

        /// SQL text given inline
        #[arg(long)]
        sql: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Show metrics, tables and CTE names
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Rule id to disable (repeatable)
        #[arg(long = "disable", value_name = "RULE_ID")]
        disabled: Vec<String>
    },

    /// List the available rules
    Rules {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace
}
