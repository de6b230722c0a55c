use super::{PerformanceRecommendation, Rule, RuleContext, RuleInfo, Severity};

/// More joins than this is a large join
const MAX_JOINS: usize = 2;
/// More nesting levels than this is deep nesting
const MAX_SUBQUERY_DEPTH: usize = 2;

/// `SELECT *` reads every column
pub struct SelectStar;

impl Rule for SelectStar {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "select-star",
            title:    "SELECT * reads every column",
            severity: Severity::Critical
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        ctx.metrics.is_select_star.then(|| {
            self.info().recommend(
                "Selecting all columns defeats column pruning in columnar storage and ships \
                 unused data to the client",
                Some("List only the columns the caller needs")
            )
        })
    }
}

/// `ORDER BY` with no `LIMIT` sorts the full result
pub struct OrderWithoutLimit;

impl Rule for OrderWithoutLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "order-without-limit",
            title:    "ORDER BY without LIMIT",
            severity: Severity::Critical
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let m = ctx.metrics;
        (m.has_order_by && !m.has_limit).then(|| {
            self.info().recommend(
                "Sorting an unbounded result set keeps every row in memory before the first \
                 one is returned",
                Some("Add LIMIT, or drop ORDER BY if the caller does not depend on order")
            )
        })
    }
}

/// Too many joins in the main query
pub struct LargeJoin;

impl Rule for LargeJoin {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "large-join",
            title:    "Many joins",
            severity: Severity::Critical
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let joins = ctx.metrics.join_count;
        (joins > MAX_JOINS).then(|| {
            self.info().recommend(
                format!("Query performs {joins} joins; each one multiplies memory use of the hash table"),
                Some("Denormalize hot lookups, use dictionaries, or pre-aggregate before joining")
            )
        })
    }
}

/// Subqueries nested too deeply
pub struct DeepNesting;

impl Rule for DeepNesting {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "deep-nesting",
            title:    "Deeply nested subqueries",
            severity: Severity::Critical
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let depth = ctx.metrics.subquery_depth;
        (depth > MAX_SUBQUERY_DEPTH).then(|| {
            self.info().recommend(
                format!("Subqueries are nested {depth} levels deep"),
                Some("Flatten the query with CTEs or joins")
            )
        })
    }
}
