use super::{PerformanceRecommendation, Rule, RuleContext, RuleInfo, Severity};

const MAX_DISTINCT_COLUMNS: usize = 5;
const MAX_AGGREGATIONS: usize = 5;
const MAX_COLUMNS: usize = 20;

/// `WHERE` filter that could be evaluated as `PREWHERE`
pub struct PrewhereOpportunity;

impl Rule for PrewhereOpportunity {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "prewhere-opportunity",
            title:    "WHERE without PREWHERE",
            severity: Severity::Warning
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let m = ctx.metrics;
        (m.has_where && !m.has_prewhere).then(|| {
            self.info().recommend(
                "PREWHERE reads the filter columns first and skips granules that cannot match",
                Some("Move selective conditions on small columns into PREWHERE")
            )
        })
    }
}

/// Plain row query with no `LIMIT`
pub struct MissingLimit;

impl Rule for MissingLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "missing-limit",
            title:    "No LIMIT",
            severity: Severity::Warning
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let m = ctx.metrics;
        (!m.has_limit && !m.has_group_by && m.aggregation_count == 0).then(|| {
            self.info().recommend(
                "The query may return every row of the table",
                Some("Add LIMIT to bound the result size")
            )
        })
    }
}

/// `DISTINCT` over many columns
pub struct WideDistinct;

impl Rule for WideDistinct {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "wide-distinct",
            title:    "DISTINCT over many columns",
            severity: Severity::Warning
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let m = ctx.metrics;
        (m.has_distinct && m.column_count > MAX_DISTINCT_COLUMNS).then(|| {
            self.info().recommend(
                format!(
                    "DISTINCT deduplicates on {} columns, building a large hash set",
                    m.column_count
                ),
                Some("Deduplicate on a key with GROUP BY or LIMIT 1 BY instead")
            )
        })
    }
}

/// Many aggregate calls
pub struct ManyAggregations;

impl Rule for ManyAggregations {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "many-aggregations",
            title:    "Many aggregate functions",
            severity: Severity::Warning
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let count = ctx.metrics.aggregation_count;
        (count > MAX_AGGREGATIONS).then(|| {
            self.info().recommend(
                format!("Query computes {count} aggregations per group"),
                Some("Precompute them in a materialized view or an AggregatingMergeTree table")
            )
        })
    }
}

/// Very wide select list
pub struct ManyColumns;

impl Rule for ManyColumns {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "many-columns",
            title:    "Many selected columns",
            severity: Severity::Warning
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let count = ctx.metrics.column_count;
        (count > MAX_COLUMNS).then(|| {
            self.info().recommend(
                format!("Query selects {count} columns"),
                Some("Fetch only the columns that are displayed or processed")
            )
        })
    }
}

/// Several tables without any join
pub struct CartesianProductRisk;

impl Rule for CartesianProductRisk {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "cartesian-product-risk",
            title:    "Possible cartesian product",
            severity: Severity::Warning
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let m = ctx.metrics;
        (m.table_count > 1 && m.join_count == 0).then(|| {
            self.info().recommend(
                format!(
                    "{} tables are referenced without a JOIN; a missing condition yields every \
                     row combination",
                    m.table_count
                ),
                Some("Use explicit JOIN ... ON syntax")
            )
        })
    }
}
