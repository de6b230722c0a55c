//! Application logic for the SQL Query Advisor CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing.

mod analyze;
mod convert;
mod helpers;
mod types;

pub use analyze::{run_analyze, run_rules};
pub use convert::{convert_format, convert_log_level};
pub use helpers::{
    calculate_exit_code, create_output_options, merge_disabled_rules, read_queries_input,
    resolve_input, select_input
};
pub use types::{AnalyzeParams, AnalyzeResult, QueryInput};
