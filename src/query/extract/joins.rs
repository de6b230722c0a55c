use std::sync::LazyLock;

use regex::Regex;

/// Optional modifier groups that may precede `JOIN`, in the order they
/// appear. At most one keyword of each group is consumed per join.
pub const JOIN_MODIFIERS: &[&[&str]] = &[
    &["GLOBAL"],
    &["ANY", "ALL"],
    &["INNER", "LEFT", "RIGHT", "FULL", "CROSS", "NATURAL", "ASYNC"],
    &["OUTER"]
];

/// One pattern for the whole join introducer, so `LEFT OUTER JOIN` counts once
static JOIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&join_pattern()).expect("valid regex"));

fn join_pattern() -> String {
    let mut pattern = String::from(r"(?i)\b");
    for group in JOIN_MODIFIERS {
        pattern.push_str(&format!(r"(?:(?:{})\s+)?", group.join("|")));
    }
    pattern.push_str(r"JOIN\b");
    pattern
}

/// Count join introducers in literal-neutralized text
#[must_use]
pub fn count_joins(sql: &str) -> usize {
    JOIN_REGEX.find_iter(sql).count()
}
