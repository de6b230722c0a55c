//! Command execution logic.
//!
//! [`run_analyze`] drives the full pipeline for the `analyze` command and
//! [`run_rules`] renders the rule catalogue.

use tracing::info;

use super::{
    helpers::{calculate_exit_code, create_output_options, merge_disabled_rules, resolve_input},
    types::{AnalyzeParams, AnalyzeResult}
};
use crate::{
    analyzer::QueryAnalyzer,
    cli::Format,
    config::Config,
    error::{AppResult, invalid_input_error},
    output::{format_analyses, format_rule_catalogue},
    preprocessor::split_statements
};

/// Executes the SQL analysis pipeline.
///
/// 1. **Input**: Reads SQL from a file, stdin or the command line
/// 2. **Splitting**: Splits the script into statements on top-level `;`
/// 3. **Analysis**: Scores every statement and runs the enabled rules in
///    parallel
/// 4. **Formatting**: Renders the results in the requested format
///
/// # Errors
///
/// Returns an error if:
/// - The input cannot be read or holds no statements
/// - JSON/YAML serialization fails
///
/// # Example
///
/// ```
/// use sql_query_advisor::{
///     app::{AnalyzeParams, QueryInput, run_analyze},
///     cli::Format,
///     config::Config
/// };
///
/// let params = AnalyzeParams {
///     input:         QueryInput::Inline("SELECT * FROM users".to_string()),
///     output_format: Format::Text,
///     verbose:       false,
///     no_color:      true,
///     disabled:      vec![]
/// };
///
/// let result = run_analyze(params, Config::default()).unwrap();
/// assert_eq!(result.exit_code, 2);
/// assert!(result.output.contains("select-star"));
/// ```
pub fn run_analyze(params: AnalyzeParams, config: Config) -> AppResult<AnalyzeResult> {
    let sql = resolve_input(&params.input)?;
    let statements = split_statements(&sql);
    if statements.is_empty() {
        return Err(invalid_input_error("input contains only comments or separators"));
    }
    let rules = merge_disabled_rules(config.rules, &params.disabled);
    let analyzer = QueryAnalyzer::with_config(rules);
    let analyses = analyzer.analyze_batch(&statements);
    info!(statements = analyses.len(), "analysis finished");

    let output_opts = create_output_options(params.output_format, params.no_color, params.verbose);
    Ok(AnalyzeResult {
        exit_code: calculate_exit_code(&analyses),
        output:    format_analyses(&analyses, &output_opts)?
    })
}

/// Lists the enabled rules with their effective tiers.
///
/// # Errors
///
/// Returns an error if JSON/YAML serialization fails.
pub fn run_rules(format: Format, no_color: bool, config: Config) -> AppResult<String> {
    let analyzer = QueryAnalyzer::with_config(config.rules);
    format_rule_catalogue(&analyzer.rules(), &create_output_options(format, no_color, false))
}
