use compact_str::CompactString;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of lower-cased identifiers
pub type NameSet = IndexSet<CompactString>;

/// Structural metrics of a single statement.
///
/// Join, subquery, aggregation, column and clause metrics come from the main
/// query only, i.e. the text after any `WITH` prologue. `table_count` counts
/// every referenced table that is not itself a CTE name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    pub table_count:       usize,
    pub join_count:        usize,
    pub subquery_depth:    usize,
    pub aggregation_count: usize,
    pub has_distinct:      bool,
    pub has_group_by:      bool,
    pub has_order_by:      bool,
    pub has_limit:         bool,
    pub has_prewhere:      bool,
    pub has_where:         bool,
    pub is_select_star:    bool,
    /// `0` for `SELECT *` or when the select list could not be located
    pub column_count:      usize
}

/// Three-tier complexity classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    #[default]
    Low,
    Medium,
    High
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High")
        }
    }
}

/// Bounded complexity score together with the metrics it was derived from.
///
/// Fields are private: the only constructor is
/// [`QueryComplexity::from_metrics`], so `level` always agrees with `score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryComplexity {
    score:   u32,
    level:   ComplexityLevel,
    metrics: QueryMetrics
}

impl QueryComplexity {
    /// Score the metrics and classify the score
    #[must_use]
    pub fn from_metrics(metrics: QueryMetrics) -> Self {
        let score = super::complexity::calculate_score(&metrics);
        Self {
            score,
            level: super::complexity::level_for_score(score),
            metrics
        }
    }

    /// Score in `0..=100`
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> ComplexityLevel {
        self.level
    }

    pub fn metrics(&self) -> &QueryMetrics {
        &self.metrics
    }
}

/// Everything the extraction pipeline learned about a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStructure {
    /// CTE names bound in the `WITH` prologue, lower-cased
    pub cte_names:  NameSet,
    /// Referenced tables excluding CTE names, lower-cased
    pub tables:     NameSet,
    /// Statement text from the first top-level `SELECT` on, comments removed
    pub main_query: String,
    pub metrics:    QueryMetrics
}
