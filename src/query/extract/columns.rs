use std::sync::LazyLock;

use regex::Regex;

use super::{at_word_start, split_top_level, starts_with_keyword};

static SELECT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT\b").expect("valid regex"));

/// Text between the first `SELECT` and its depth-0 `FROM`.
///
/// Returns `None` when there is no `SELECT`, when the enclosing parenthesis
/// closes first, or when no `FROM` follows. Expects literal-neutralized text.
#[must_use]
pub fn extract_select_clause(sql: &str) -> Option<&str> {
    let start = SELECT_REGEX.find(sql)?.end();
    let rest = &sql[start..];
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return None,
            ')' => depth -= 1,
            'f' | 'F'
                if depth == 0 && at_word_start(rest, i) && starts_with_keyword(&rest[i..], "FROM") =>
            {
                return Some(&rest[..i]);
            }
            _ => {}
        }
    }
    None
}

/// Number of top-level items in the select list.
///
/// `0` for a bare `*` list and when the list cannot be located.
///
/// ```
/// use sql_query_advisor::query::count_columns;
///
/// assert_eq!(count_columns("SELECT a, coalesce(b, c), d FROM t"), 3);
/// assert_eq!(count_columns("SELECT * FROM t"), 0);
/// ```
#[must_use]
pub fn count_columns(sql: &str) -> usize {
    match extract_select_clause(sql).map(str::trim) {
        None | Some("") | Some("*") => 0,
        Some(clause) => split_top_level(clause, ',').len()
    }
}

/// Whether the top-level select list starts with a bare `*`.
///
/// A leading `DISTINCT` is skipped, so `SELECT DISTINCT * FROM t` counts,
/// and so does ClickHouse `SELECT * EXCEPT (col) FROM t`.
#[must_use]
pub fn is_select_star(sql: &str) -> bool {
    let Some(clause) = extract_select_clause(sql) else {
        return false;
    };
    let mut list = clause.trim_start();
    if starts_with_keyword(list, "DISTINCT") {
        list = list["DISTINCT".len()..].trim_start();
    }
    list.starts_with('*')
}
