use std::sync::LazyLock;

use regex::Regex;

use super::top_level_end;

/// Clause presence flags of the main query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClauseFlags {
    pub has_distinct: bool,
    pub has_group_by: bool,
    pub has_order_by: bool,
    pub has_limit:    bool,
    pub has_prewhere: bool,
    pub has_where:    bool
}

static DISTINCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDISTINCT\b").expect("valid regex"));
static GROUP_BY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bGROUP\s+BY\b").expect("valid regex"));
static ORDER_BY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\b").expect("valid regex"));
static LIMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid regex"));
static PREWHERE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPREWHERE\b").expect("valid regex"));
static WHERE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").expect("valid regex"));

/// Keywords that close a `WHERE`, `PREWHERE` or `GROUP BY` body
const CLAUSE_TERMINATORS: &[&str] = &[
    "WHERE", "GROUP", "ORDER", "LIMIT", "HAVING", "UNION", "EXCEPT", "INTERSECT", "SETTINGS",
    "FORMAT", "WINDOW", "QUALIFY", "OFFSET", "WITH"
];

/// Detect clause keywords in literal-neutralized text
#[must_use]
pub fn detect_clauses(sql: &str) -> ClauseFlags {
    ClauseFlags {
        has_distinct: DISTINCT_REGEX.is_match(sql),
        has_group_by: GROUP_BY_REGEX.is_match(sql),
        has_order_by: ORDER_BY_REGEX.is_match(sql),
        has_limit:    LIMIT_REGEX.is_match(sql),
        has_prewhere: PREWHERE_REGEX.is_match(sql),
        has_where:    WHERE_REGEX.is_match(sql)
    }
}

/// Body of the first clause introduced by `introducer`.
///
/// The body runs from the end of the introducer match to the next depth-0
/// clause keyword, the `)` closing the enclosing subquery, or a `;`.
///
/// ```
/// use regex::Regex;
/// use sql_query_advisor::query::clause_body;
///
/// let group_by = Regex::new(r"(?i)\bGROUP\s+BY\b").unwrap();
/// let sql = "SELECT a FROM t GROUP BY a, toDate(b) ORDER BY a";
/// assert_eq!(clause_body(sql, &group_by), Some(" a, toDate(b) "));
/// ```
#[must_use]
pub fn clause_body<'a>(sql: &'a str, introducer: &Regex) -> Option<&'a str> {
    let start = introducer.find(sql)?.end();
    let rest = &sql[start..];
    Some(&rest[..top_level_end(rest, CLAUSE_TERMINATORS)])
}
