//! Application types for CLI commands.
//!
//! This module defines the data structures passed between the CLI entry
//! point and the command implementations.

use std::path::PathBuf;

use crate::cli::Format;

/// Where the SQL to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// SQL file path, or `-` for stdin
    File(PathBuf),
    /// SQL text given on the command line
    Inline(String)
}

/// Parameters for the analyze command.
///
/// # Example
///
/// ```
/// use sql_query_advisor::{
///     app::{AnalyzeParams, QueryInput},
///     cli::Format
/// };
///
/// let params = AnalyzeParams {
///     input:         QueryInput::Inline("SELECT 1".to_string()),
///     output_format: Format::Json,
///     verbose:       false,
///     no_color:      true,
///     disabled:      vec!["missing-limit".to_string()]
/// };
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    /// SQL source.
    pub input:         QueryInput,
    /// Output format for results.
    pub output_format: Format,
    /// Show metrics, tables and CTE names.
    pub verbose:       bool,
    /// Disable colored terminal output.
    pub no_color:      bool,
    /// Rule ids disabled on the command line.
    pub disabled:      Vec<String>
}

/// Result of a command containing its output.
///
/// # Fields
///
/// * `exit_code` - Process exit code (0=clean, 1=warnings, 2=critical)
/// * `output` - Formatted results ready for stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeResult {
    /// Exit code based on recommendation severity (0, 1, or 2).
    pub exit_code: i32,
    /// Formatted output.
    pub output:    String
}
