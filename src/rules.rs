//! Recommendation rule engine.
//!
//! Each rule is an independent type implementing [`Rule`]: it inspects the
//! statement's [`QueryMetrics`] and text through a [`RuleContext`] and emits
//! at most one [`PerformanceRecommendation`]. No rule depends on another.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ RuleContext │────▶│  RuleRunner  │────▶│ Recommendations  │
//! └─────────────┘     └──────────────┘     └──────────────────┘
//!                            │
//!                     ┌──────┴──────┐
//!                     │   Rules     │
//!                     │  (parallel) │
//!                     └─────────────┘
//! ```
//!
//! The [`RuleRunner`] evaluates all enabled rules in parallel using
//! [`rayon`]. Results keep rule declaration order and are then stable-sorted
//! by tier: critical, warning, info.
//!
//! # Tiers
//!
//! - **Critical** - `select-star`, `order-without-limit`, `large-join`,
//!   `deep-nesting`
//! - **Warning** - `prewhere-opportunity`, `missing-limit`, `wide-distinct`,
//!   `many-aggregations`, `many-columns`, `cartesian-product-risk`
//! - **Info** - `leading-wildcard`, `negated-membership`,
//!   `union-without-all`, `function-on-column`,
//!   `aggregation-without-group-by`, `correlated-subquery`, `large-in-list`,
//!   `many-or-conditions`, `final-keyword`, `group-by-expression`
//!
//! # Configuration
//!
//! Rules can be disabled or moved to another tier via [`RulesConfig`]:
//!
//! ```toml
//! [rules]
//! disabled = ["prewhere-opportunity"]
//!
//! [rules.severity]
//! missing-limit = "critical"
//! ```
//!
//! # Implementing Custom Rules
//!
//! ```
//! use sql_query_advisor::rules::{
//!     PerformanceRecommendation, Rule, RuleContext, RuleInfo, Severity
//! };
//!
//! pub struct SampleClause;
//!
//! impl Rule for SampleClause {
//!     fn info(&self) -> RuleInfo {
//!         RuleInfo {
//!             id:       "sample-clause",
//!             title:    "SAMPLE clause",
//!             severity: Severity::Info
//!         }
//!     }
//!
//!     fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
//!         ctx.neutralized()
//!             .contains(" SAMPLE ")
//!             .then(|| self.info().recommend("Results are approximate", None))
//!     }
//! }
//! ```

mod critical;
mod info;
mod types;
mod warning;

use std::{collections::HashMap, sync::LazyLock};

use rayon::prelude::*;
use tracing::trace;
pub use types::{PerformanceRecommendation, RuleContext, RuleInfo, Severity};

use crate::{config::RulesConfig, query::QueryMetrics};

/// Trait for implementing recommendation rules.
///
/// Rules are stateless predicates; they must be `Send + Sync` for parallel
/// evaluation.
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Inspect one statement.
    ///
    /// # Returns
    ///
    /// The recommendation, or `None` when the rule does not apply.
    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation>;
}

/// Every built-in rule in evaluation order
fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(critical::SelectStar),
        Box::new(critical::OrderWithoutLimit),
        Box::new(critical::LargeJoin),
        Box::new(critical::DeepNesting),
        Box::new(warning::PrewhereOpportunity),
        Box::new(warning::MissingLimit),
        Box::new(warning::WideDistinct),
        Box::new(warning::ManyAggregations),
        Box::new(warning::ManyColumns),
        Box::new(warning::CartesianProductRisk),
        Box::new(info::LeadingWildcard),
        Box::new(info::NegatedMembership),
        Box::new(info::UnionWithoutAll),
        Box::new(info::FunctionOnColumn),
        Box::new(info::AggregationWithoutGroupBy),
        Box::new(info::CorrelatedSubquery),
        Box::new(info::LargeInList),
        Box::new(info::ManyOrConditions),
        Box::new(info::FinalKeyword),
        Box::new(info::GroupByExpression),
    ]
}

static DEFAULT_RUNNER: LazyLock<RuleRunner> = LazyLock::new(RuleRunner::new);

/// Parallel rule evaluation engine.
///
/// # Example
///
/// ```
/// use sql_query_advisor::{config::RulesConfig, query::extract_metrics, rules::{RuleContext, RuleRunner}};
///
/// let config = RulesConfig {
///     disabled: vec!["prewhere-opportunity".into()],
///     ..Default::default()
/// };
/// let runner = RuleRunner::with_config(config);
///
/// let sql = "SELECT id FROM users WHERE id = 1";
/// let metrics = extract_metrics(sql);
/// let recommendations = runner.evaluate(&RuleContext::new(sql, &metrics));
///
/// assert!(recommendations.iter().all(|r| r.id != "prewhere-opportunity"));
/// ```
pub struct RuleRunner {
    rules:              Vec<Box<dyn Rule>>,
    severity_overrides: HashMap<&'static str, Severity>
}

impl Default for RuleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRunner {
    /// Create a runner with every built-in rule at its default tier
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Create a runner honoring disabled rules and severity overrides
    ///
    /// # Notes
    ///
    /// - Rule ids match case-insensitively, in `disabled` and `severity` alike
    /// - Unknown severity names are ignored
    pub fn with_config(config: RulesConfig) -> Self {
        let mut folded = RulesConfig::default();
        folded.merge(config);
        let config = folded;
        let rules: Vec<Box<dyn Rule>> = builtin_rules()
            .into_iter()
            .filter(|r| {
                !config
                    .disabled
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(r.info().id))
            })
            .collect();
        let mut severity_overrides = HashMap::new();
        for rule in &rules {
            let rule_id = rule.info().id;
            if let Some(sev) = config
                .severity
                .get(rule_id)
                .and_then(|sev| Severity::parse(sev))
            {
                severity_overrides.insert(rule_id, sev);
            }
        }
        Self {
            rules,
            severity_overrides
        }
    }

    /// Metadata of the enabled rules, effective tier applied
    pub fn rules(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|rule| {
                let mut info = rule.info();
                if let Some(&severity) = self.severity_overrides.get(info.id) {
                    info.severity = severity;
                }
                info
            })
            .collect()
    }

    /// Evaluate every rule and order the results by tier
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<PerformanceRecommendation> {
        let mut recommendations: Vec<PerformanceRecommendation> = self
            .rules
            .par_iter()
            .filter_map(|rule| rule.check(ctx))
            .collect();
        for recommendation in &mut recommendations {
            if let Some(&severity) = self.severity_overrides.get(recommendation.id) {
                recommendation.severity = severity;
            }
            trace!(rule = recommendation.id, severity = %recommendation.severity, "rule fired");
        }
        recommendations.sort_by_key(|r| r.severity.rank());
        recommendations
    }
}

/// Evaluate the built-in rules against one statement
///
/// ```
/// use sql_query_advisor::{query::extract_metrics, rules::generate_recommendations};
///
/// let sql = "SELECT * FROM t";
/// let ids: Vec<&str> = generate_recommendations(sql, &extract_metrics(sql))
///     .iter()
///     .map(|r| r.id)
///     .collect();
/// assert!(ids.contains(&"select-star"));
/// ```
pub fn generate_recommendations(
    sql: &str,
    metrics: &QueryMetrics
) -> Vec<PerformanceRecommendation> {
    DEFAULT_RUNNER.evaluate(&RuleContext::new(sql, metrics))
}
