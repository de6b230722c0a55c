//! Informational rules. These read the statement text directly, so every
//! pattern runs on the uppercased views of [`RuleContext`].

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use super::{PerformanceRecommendation, Rule, RuleContext, RuleInfo, Severity};
use crate::query::{clause_body, extract_main_query, extract_select_clause};

const MAX_OR_CONDITIONS: usize = 3;
/// Characters inside an `IN (...)` value list that make it large
const LARGE_IN_LIST_CHARS: usize = 500;

static LIKE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bI?LIKE\s+['"]"#).expect("valid regex"));
static NEGATED_MEMBERSHIP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNOT\s+(?:IN|EXISTS)\b").expect("valid regex"));
static UNION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bUNION\b").expect("valid regex"));
static UNION_ALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bUNION\s+ALL\b").expect("valid regex"));
static WHERE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bWHERE\b").expect("valid regex"));
static GROUP_BY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bGROUP\s+BY\b").expect("valid regex"));
static WRAPPED_COLUMN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z_][A-Z0-9_]*)\s*\(\s*[A-Z_][A-Z0-9_.]*\s*\)\s*(?:=|<|>|!|\bIN\b|\bLIKE\b|\bBETWEEN\b)"
    )
    .expect("valid regex")
});
static SCALAR_SUBQUERY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*SELECT\b").expect("valid regex"));
static IN_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bIN\s*\(").expect("valid regex"));
static OR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bOR\b").expect("valid regex"));
static FINAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFINAL\b").expect("valid regex"));

/// Words that may precede a parenthesized operand without being a function
const NON_FUNCTION_WORDS: &[&str] = &["IN", "EXISTS", "AND", "OR", "NOT", "ANY", "ALL"];

/// `LIKE '%...'` cannot use an index
pub struct LeadingWildcard;

impl Rule for LeadingWildcard {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "leading-wildcard",
            title:    "LIKE pattern with leading wildcard",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let normalized = ctx.normalized();
        LIKE_REGEX
            .find_iter(ctx.neutralized())
            .any(|m| normalized[m.end()..].starts_with('%'))
            .then(|| {
                self.info().recommend(
                    "A pattern starting with % forces a full scan of the column",
                    Some("Anchor the pattern at the start, or use a token or ngram bloom filter index")
                )
            })
    }
}

/// `NOT IN` / `NOT EXISTS`
pub struct NegatedMembership;

impl Rule for NegatedMembership {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "negated-membership",
            title:    "NOT IN / NOT EXISTS",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        NEGATED_MEMBERSHIP_REGEX.is_match(ctx.neutralized()).then(|| {
            self.info().recommend(
                "Negated membership checks cannot skip data and behave surprisingly with NULLs",
                Some("Consider LEFT ANTI JOIN")
            )
        })
    }
}

/// `UNION` deduplicates the combined result
pub struct UnionWithoutAll;

impl Rule for UnionWithoutAll {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "union-without-all",
            title:    "UNION without ALL",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let text = ctx.neutralized();
        let unions = UNION_REGEX.find_iter(text).count();
        let union_alls = UNION_ALL_REGEX.find_iter(text).count();
        (unions > union_alls).then(|| {
            self.info().recommend(
                "UNION removes duplicates, which needs a hash set over the whole result",
                Some("Use UNION ALL when the branches cannot overlap")
            )
        })
    }
}

/// `fn(column) <op> ...` in `WHERE`
pub struct FunctionOnColumn;

impl Rule for FunctionOnColumn {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "function-on-column",
            title:    "Function applied to filtered column",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let body = clause_body(ctx.neutralized(), &WHERE_REGEX)?;
        let function = WRAPPED_COLUMN_REGEX
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|name| !NON_FUNCTION_WORDS.contains(name))?;
        Some(self.info().recommend(
            format!("WHERE applies {function}() to a column, so the primary key cannot prune it"),
            Some("Compare the raw column against a transformed constant instead")
        ))
    }
}

/// Aggregates mixed with plain columns and no `GROUP BY`
pub struct AggregationWithoutGroupBy;

impl Rule for AggregationWithoutGroupBy {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "aggregation-without-group-by",
            title:    "Aggregation without GROUP BY",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let m = ctx.metrics;
        (m.aggregation_count > 0 && !m.has_group_by && m.column_count > m.aggregation_count)
            .then(|| {
                self.info().recommend(
                    "The select list mixes aggregates and plain columns without GROUP BY",
                    Some("Group by the plain columns or wrap them in any()")
                )
            })
    }
}

/// Subquery inside the select list, evaluated per row
pub struct CorrelatedSubquery;

impl Rule for CorrelatedSubquery {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "correlated-subquery",
            title:    "Subquery in select list",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let select_list = extract_select_clause(extract_main_query(ctx.neutralized()))?;
        SCALAR_SUBQUERY_REGEX.is_match(select_list).then(|| {
            self.info().recommend(
                "A subquery in the select list can run once per output row",
                Some("Rewrite it as a JOIN or a window function")
            )
        })
    }
}

/// Very long literal `IN (...)` list
pub struct LargeInList;

impl Rule for LargeInList {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "large-in-list",
            title:    "Large IN list",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let neutralized = ctx.neutralized();
        if !IN_LIST_REGEX.is_match(neutralized) {
            return None;
        }
        let closes = closing_parens(neutralized);
        let chars_before = char_offsets(ctx.normalized());
        let longest = IN_LIST_REGEX
            .find_iter(neutralized)
            .filter_map(|m| {
                let start = m.end();
                let end = closes.get(&start).copied().unwrap_or(neutralized.len());
                let inner = &neutralized[start..end];
                (!inner.trim_start().starts_with("SELECT"))
                    .then(|| chars_before[end] - chars_before[start])
            })
            .max()?;
        (longest >= LARGE_IN_LIST_CHARS).then(|| {
            self.info().recommend(
                format!("An IN list spans {longest} characters"),
                Some("Load the values into a temporary table or a Set and join against it")
            )
        })
    }
}

/// Byte offset just past each matched `(`, mapped to its closing `)`
fn closing_parens(text: &str) -> HashMap<usize, usize> {
    let mut open = Vec::new();
    let mut closes = HashMap::new();
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'(' => open.push(i + 1),
            b')' => {
                if let Some(start) = open.pop() {
                    closes.insert(start, i);
                }
            }
            _ => {}
        }
    }
    closes
}

/// Number of chars starting before each byte offset, `text.len()` included
fn char_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    let mut count = 0;
    offsets.push(count);
    for b in text.bytes() {
        if b & 0xC0 != 0x80 {
            count += 1;
        }
        offsets.push(count);
    }
    offsets
}

/// Long chains of `OR`
pub struct ManyOrConditions;

impl Rule for ManyOrConditions {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "many-or-conditions",
            title:    "Many OR conditions",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        let count = OR_REGEX.find_iter(ctx.neutralized()).count();
        (count > MAX_OR_CONDITIONS).then(|| {
            self.info().recommend(
                format!("Filter chains {count} OR conditions"),
                Some("Replace equality chains with IN, or split the query with UNION ALL")
            )
        })
    }
}

/// `FINAL` merges parts at query time
pub struct FinalKeyword;

impl Rule for FinalKeyword {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "final-keyword",
            title:    "FINAL modifier",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        FINAL_REGEX.is_match(ctx.neutralized()).then(|| {
            self.info().recommend(
                "FINAL merges data parts while reading and is single-threaded on older servers",
                Some("Deduplicate with argMax() and GROUP BY, or run OPTIMIZE in the background")
            )
        })
    }
}

/// Computed expressions in `GROUP BY`
pub struct GroupByExpression;

impl Rule for GroupByExpression {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "group-by-expression",
            title:    "Expression in GROUP BY",
            severity: Severity::Info
        }
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<PerformanceRecommendation> {
        clause_body(ctx.neutralized(), &GROUP_BY_REGEX)?
            .contains('(')
            .then(|| {
                self.info().recommend(
                    "Grouping keys are computed for every row",
                    Some("Materialize the expression as a column")
                )
            })
    }
}
