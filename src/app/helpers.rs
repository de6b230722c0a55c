//! Helper functions for CLI operations.
//!
//! Reading input, merging rule configuration and mapping results to exit
//! codes.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::{Path, PathBuf}
};

use super::{convert::convert_format, types::QueryInput};
use crate::{
    analyzer::StatementAnalysis,
    cli::Format,
    config::RulesConfig,
    error::{AppResult, file_read_error, invalid_input_error},
    output::OutputOptions,
    rules::Severity
};

/// Calculates the process exit code from recommendation severities.
///
/// - `0` - No recommendations, or only informational ones
/// - `1` - At least one warning present
/// - `2` - At least one critical recommendation present
///
/// # Example
///
/// ```
/// use sql_query_advisor::app::calculate_exit_code;
///
/// assert_eq!(calculate_exit_code(&[]), 0);
/// ```
pub fn calculate_exit_code(analyses: &[StatementAnalysis]) -> i32 {
    match analyses
        .iter()
        .filter_map(|a| a.result.max_severity())
        .max()
    {
        Some(Severity::Critical) => 2,
        Some(Severity::Warning) => 1,
        Some(Severity::Info) | None => 0
    }
}

/// Reads SQL from a file, or from stdin when the path is `-`.
///
/// # Errors
///
/// Returns a file read error when the file or stdin cannot be read, which
/// includes input that is not valid UTF-8.
pub fn read_queries_input(path: &Path) -> AppResult<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
    }
}

/// Picks the input source from `--queries` and `--sql`.
///
/// A file path wins when both are present.
///
/// # Errors
///
/// Returns an invalid input error when neither is given.
pub fn select_input(queries: Option<PathBuf>, sql: Option<String>) -> AppResult<QueryInput> {
    queries
        .map(QueryInput::File)
        .or_else(|| sql.map(QueryInput::Inline))
        .ok_or_else(|| invalid_input_error("either --queries or --sql is required"))
}

/// Resolves the SQL text to analyze.
///
/// # Errors
///
/// Returns an invalid input error when the text is empty or only
/// whitespace.
pub fn resolve_input(input: &QueryInput) -> AppResult<String> {
    let sql = match input {
        QueryInput::File(path) => read_queries_input(path)?,
        QueryInput::Inline(sql) => sql.clone()
    };
    if sql.trim().is_empty() {
        return Err(invalid_input_error("no SQL to analyze"));
    }
    Ok(sql)
}

/// Adds rules disabled on the command line to the loaded configuration.
pub fn merge_disabled_rules(mut rules: RulesConfig, disabled: &[String]) -> RulesConfig {
    rules.merge(RulesConfig {
        disabled: disabled.to_vec(),
        ..Default::default()
    });
    rules
}

/// Creates output options from CLI flags.
///
/// # Example
///
/// ```
/// use sql_query_advisor::{app::create_output_options, cli::Format, output::OutputFormat};
///
/// let opts = create_output_options(Format::Json, true, false);
/// assert_eq!(opts.format, OutputFormat::Json);
/// assert!(!opts.colored);
/// ```
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}
