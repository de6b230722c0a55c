use std::sync::LazyLock;

use regex::Regex;

/// Aggregate and statistical function names counted as aggregations.
///
/// Standard SQL, ClickHouse families and value window functions. `any` is
/// absent on purpose: it would also match `ANY JOIN`.
pub const AGGREGATE_FUNCTIONS: &[&str] = &[
    // standard
    "count",
    "sum",
    "avg",
    "min",
    "max",
    "array_agg",
    "string_agg",
    "group_concat",
    "median",
    "mode",
    "bit_and",
    "bit_or",
    "bool_and",
    "bool_or",
    "every",
    // ClickHouse combinators and variants
    "countIf",
    "sumIf",
    "avgIf",
    "minIf",
    "maxIf",
    "anyLast",
    "anyHeavy",
    "argMin",
    "argMax",
    "sumMap",
    "minMap",
    "maxMap",
    "uniq",
    "uniqExact",
    "uniqCombined",
    "uniqCombined64",
    "uniqHLL12",
    "uniqTheta",
    "uniqIf",
    "quantile",
    "quantiles",
    "quantileExact",
    "quantileExactWeighted",
    "quantileTiming",
    "quantileTDigest",
    "quantileDeterministic",
    "quantileBFloat16",
    "groupArray",
    "groupArrayInsertAt",
    "groupArrayMovingSum",
    "groupArrayMovingAvg",
    "groupArraySample",
    "groupUniqArray",
    "groupBitAnd",
    "groupBitOr",
    "groupBitXor",
    "groupBitmap",
    "stddev",
    "stddevPop",
    "stddevSamp",
    "stddev_pop",
    "stddev_samp",
    "variance",
    "varPop",
    "varSamp",
    "var_pop",
    "var_samp",
    "covarPop",
    "covarSamp",
    "covar_pop",
    "covar_samp",
    "corr",
    "entropy",
    "topK",
    "topKWeighted",
    "simpleLinearRegression",
    // window
    "first_value",
    "last_value",
    "nth_value"
];

static AGGREGATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = AGGREGATE_FUNCTIONS
        .iter()
        .map(|name| regex::escape(name))
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\s*\(", names.join("|"))).expect("valid regex")
});

/// Count aggregate function calls (`name(` or `name (`)
#[must_use]
pub fn count_aggregations(sql: &str) -> usize {
    AGGREGATE_REGEX.find_iter(sql).count()
}
