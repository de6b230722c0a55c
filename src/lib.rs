//! # SQL Query Advisor Library
//!
//! Heuristic structural analysis of SQL statements: complexity metrics, a
//! bounded score and tiered performance recommendations. No SQL grammar is
//! built; every extractor is a total function over text.
//!
//! ```
//! use sql_query_advisor::{analyze_query, query::ComplexityLevel};
//!
//! let result = analyze_query(
//!     "SELECT a FROM t1 JOIN t2 ON t1.id = t2.id JOIN t3 ON t2.id = t3.id \
//!      JOIN t4 ON t3.id = t4.id"
//! );
//! assert_eq!(result.complexity.metrics().join_count, 3);
//! assert!(result.recommendations.iter().any(|r| r.id == "large-join"));
//! assert_eq!(result.complexity.score(), 35);
//! assert_eq!(result.complexity.level(), ComplexityLevel::Medium);
//! ```
//!
//! # Modules
//!
//! - [`preprocessor`] - Comment removal, literal neutralization, statement
//!   splitting
//! - [`query`] - Metric extraction and complexity scoring
//! - [`rules`] - Recommendation rule engine
//! - [`analyzer`] - Facade combining the two
//! - [`config`] - Configuration loading
//! - [`output`] - Result formatting
//! - [`error`] - Error types and constructors

pub mod analyzer;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod preprocessor;
pub mod query;
pub mod rules;

pub use analyzer::{QueryAnalysisResult, QueryAnalyzer, StatementAnalysis, analyze_query};
pub use query::{ComplexityLevel, QueryComplexity, QueryMetrics, QueryStructure};
pub use rules::{PerformanceRecommendation, Severity};
