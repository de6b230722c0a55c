//! Analysis facade combining metric extraction, scoring and rules.
//!
//! Every call recomputes its result from the input text alone. The analyzer
//! holds only the immutable rule set, so one instance can be shared across
//! threads.

use std::sync::LazyLock;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::RulesConfig,
    query::{QueryComplexity, QueryStructure, extract_structure},
    rules::{PerformanceRecommendation, RuleContext, RuleInfo, RuleRunner, Severity}
};

/// Complexity assessment and recommendations for one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryAnalysisResult {
    pub complexity:      QueryComplexity,
    /// Ordered critical, warning, info
    pub recommendations: Vec<PerformanceRecommendation>
}

impl QueryAnalysisResult {
    /// Number of recommendations at the given tier
    pub fn count(&self, severity: Severity) -> usize {
        self.recommendations
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    /// Highest tier among the recommendations
    pub fn max_severity(&self) -> Option<Severity> {
        self.recommendations.iter().map(|r| r.severity).max()
    }
}

/// One statement of a script together with its analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementAnalysis {
    /// Zero-based position in the script
    pub index:     usize,
    pub sql:       String,
    #[serde(skip)]
    pub structure: QueryStructure,
    #[serde(flatten)]
    pub result:    QueryAnalysisResult
}

/// Reusable analyzer with a configured rule set.
///
/// # Example
///
/// ```
/// use sql_query_advisor::{analyzer::QueryAnalyzer, query::ComplexityLevel};
///
/// let analyzer = QueryAnalyzer::new();
/// let result = analyzer.analyze("SELECT id FROM users LIMIT 10");
///
/// assert_eq!(result.complexity.level(), ComplexityLevel::Low);
/// assert!(result.recommendations.is_empty());
/// ```
#[derive(Default)]
pub struct QueryAnalyzer {
    runner: RuleRunner
}

impl QueryAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer honoring disabled rules and severity overrides
    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            runner: RuleRunner::with_config(config)
        }
    }

    /// Analyze one statement
    pub fn analyze(&self, sql: &str) -> QueryAnalysisResult {
        self.analyze_with_structure(sql).1
    }

    /// Analyze one statement, also returning what extraction found
    ///
    /// Blank input yields the default structure and result.
    pub fn analyze_with_structure(&self, sql: &str) -> (QueryStructure, QueryAnalysisResult) {
        if sql.trim().is_empty() {
            return (QueryStructure::default(), QueryAnalysisResult::default());
        }
        let structure = extract_structure(sql);
        let complexity = QueryComplexity::from_metrics(structure.metrics);
        let recommendations = self
            .runner
            .evaluate(&RuleContext::new(sql, &structure.metrics));
        debug!(
            metrics = ?structure.metrics,
            score = complexity.score(),
            level = %complexity.level(),
            recommendations = recommendations.len(),
            "analyzed statement"
        );
        (
            structure,
            QueryAnalysisResult {
                complexity,
                recommendations
            }
        )
    }

    /// Analyze statements in parallel, keeping input order
    pub fn analyze_batch(&self, statements: &[String]) -> Vec<StatementAnalysis> {
        statements
            .par_iter()
            .enumerate()
            .map(|(index, sql)| {
                let (structure, result) = self.analyze_with_structure(sql);
                StatementAnalysis {
                    index,
                    sql: sql.trim().to_string(),
                    structure,
                    result
                }
            })
            .collect()
    }

    /// Enabled rules with their effective tiers
    pub fn rules(&self) -> Vec<RuleInfo> {
        self.runner.rules()
    }
}

static DEFAULT_ANALYZER: LazyLock<QueryAnalyzer> = LazyLock::new(QueryAnalyzer::new);

/// Analyze one statement with the built-in rules
///
/// ```
/// use sql_query_advisor::{analyze_query, rules::Severity};
///
/// let result = analyze_query("SELECT * FROM t");
/// assert!(result.complexity.metrics().is_select_star);
/// assert_eq!(result.recommendations[0].id, "select-star");
/// assert_eq!(result.recommendations[0].severity, Severity::Critical);
/// ```
pub fn analyze_query(sql: &str) -> QueryAnalysisResult {
    DEFAULT_ANALYZER.analyze(sql)
}
