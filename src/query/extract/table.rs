//! Table reference extraction from `FROM` and `JOIN` positions.

use std::sync::LazyLock;

use compact_str::CompactString;
use regex::Regex;

use super::{at_word_start, is_word_char, starts_with_keyword};
use crate::query::types::NameSet;

/// Keywords that end a `FROM` list or can never be a table name.
pub const TABLE_CLAUSE_KEYWORDS: &[&str] = &[
    "SELECT", "WHERE", "PREWHERE", "JOIN", "ON", "USING", "GROUP", "ORDER", "LIMIT", "HAVING",
    "UNION", "EXCEPT", "INTERSECT", "INNER", "LEFT", "RIGHT", "FULL", "CROSS", "NATURAL", "OUTER",
    "GLOBAL", "ANY", "ALL", "ASOF", "SEMI", "ANTI", "ASYNC", "ARRAY", "LATERAL", "FINAL",
    "SAMPLE", "SETTINGS", "FORMAT", "WINDOW", "QUALIFY", "OFFSET"
];

/// `FROM name`, with an optional `(` marking a table function
static FROM_TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bFROM\s+([\w.$`"]+)(\s*\()?"#).expect("valid regex")
});

/// `JOIN name`, with an optional `(` marking a table function
static JOIN_TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bJOIN\s+([\w.$`"]+)(\s*\()?"#).expect("valid regex")
});

/// Collect table names referenced after `FROM` and `JOIN`.
///
/// Three passes run over comment-free, literal-neutralized text: `FROM t`,
/// `JOIN t`, and every item of a comma-separated `FROM t1, t2` list.
/// Candidates are unquoted and lower-cased; CTE names, keywords, subqueries
/// and table functions are skipped.
///
/// ```
/// use sql_query_advisor::query::{NameSet, extract_tables};
///
/// let tables = extract_tables("SELECT * FROM Orders o, `Users` u JOIN db.items i ON 1", &NameSet::new());
/// let names: Vec<&str> = tables.iter().map(|t| t.as_str()).collect();
/// assert_eq!(names, vec!["orders", "db.items", "users"]);
/// ```
#[must_use]
pub fn extract_tables(sql: &str, cte_names: &NameSet) -> NameSet {
    let mut tables = NameSet::new();
    for regex in [&*FROM_TABLE_REGEX, &*JOIN_TABLE_REGEX] {
        for cap in regex.captures_iter(sql) {
            if cap.get(2).is_some() {
                continue;
            }
            if let Some(name) = cap.get(1).and_then(|m| normalize_table_name(m.as_str())) {
                insert_table(&mut tables, name, cte_names);
            }
        }
    }
    for item in from_list_items(sql) {
        if let Some(name) = item
            .split_whitespace()
            .next()
            .and_then(normalize_table_name)
        {
            insert_table(&mut tables, name, cte_names);
        }
    }
    tables
}

/// A `FROM` list whose end has not been seen yet
struct OpenList {
    depth:  usize,
    start:  usize,
    commas: Vec<usize>
}

impl OpenList {
    fn push_items<'a>(self, sql: &'a str, end: usize, items: &mut Vec<&'a str>) {
        if self.commas.is_empty() {
            return;
        }
        let mut from = self.start;
        for comma in self.commas {
            items.push(&sql[from..comma]);
            from = comma + 1;
        }
        items.push(&sql[from..end]);
    }
}

/// Items of every `FROM` list with at least two comma-separated entries.
///
/// Single left-to-right pass. A list ends at a `)` closing a paren opened
/// before it, or at a `;`, a clause keyword or another `FROM` at its own
/// paren depth, so at most one list is open per depth.
fn from_list_items(sql: &str) -> Vec<&str> {
    let mut open: Vec<OpenList> = Vec::new();
    let mut items = Vec::new();
    let mut depth = 0usize;
    for (i, c) in sql.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                close_list(&mut open, depth, sql, i, &mut items);
                depth = depth.saturating_sub(1);
            }
            ';' => close_list(&mut open, depth, sql, i, &mut items),
            ',' => {
                if let Some(list) = open.last_mut().filter(|list| list.depth == depth) {
                    list.commas.push(i);
                }
            }
            c if is_word_char(c) && at_word_start(sql, i) => {
                let rest = &sql[i..];
                if starts_with_keyword(rest, "FROM") {
                    close_list(&mut open, depth, sql, i, &mut items);
                    let after = &rest["FROM".len()..];
                    let gap = after.len() - after.trim_start().len();
                    if gap > 0 {
                        open.push(OpenList {
                            depth,
                            start: i + "FROM".len() + gap,
                            commas: Vec::new()
                        });
                    }
                } else if open.last().is_some_and(|list| list.depth == depth)
                    && TABLE_CLAUSE_KEYWORDS
                        .iter()
                        .any(|kw| starts_with_keyword(rest, kw))
                {
                    close_list(&mut open, depth, sql, i, &mut items);
                }
            }
            _ => {}
        }
    }
    while let Some(list) = open.pop() {
        list.push_items(sql, sql.len(), &mut items);
    }
    items
}

/// End the list open at `depth`, if any, at byte `end`
fn close_list<'a>(
    open: &mut Vec<OpenList>,
    depth: usize,
    sql: &'a str,
    end: usize,
    items: &mut Vec<&'a str>
) {
    if open.last().is_none_or(|list| list.depth != depth) {
        return;
    }
    if let Some(list) = open.pop() {
        list.push_items(sql, end, items);
    }
}

fn insert_table(tables: &mut NameSet, name: CompactString, cte_names: &NameSet) {
    if !cte_names.contains(&name) {
        tables.insert(name);
    }
}

/// Strip quoting and lower-case a candidate, rejecting non-tables
fn normalize_table_name(raw: &str) -> Option<CompactString> {
    if raw.contains('(') {
        return None;
    }
    let name: String = raw.chars().filter(|c| *c != '`' && *c != '"').collect();
    if name.is_empty()
        || name.starts_with('.')
        || TABLE_CLAUSE_KEYWORDS
            .iter()
            .any(|kw| name.eq_ignore_ascii_case(kw))
    {
        return None;
    }
    Some(CompactString::from(name.to_lowercase()))
}
