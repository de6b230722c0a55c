//! `WITH` prologue handling: CTE name collection and main query location.

use compact_str::CompactString;

use super::{at_word_start, is_word_char, starts_with_keyword};
use crate::query::types::NameSet;

/// What the CTE scanner expects next at parenthesis depth 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum CteMode {
    /// A CTE name, a comma or the main `SELECT`
    #[default]
    Name,
    /// Inside `name (col, ...)` before `AS`
    ColumnList,
    /// Saw `AS`, waiting for the body's `(`
    ExpectBody,
    /// Inside the body
    Body
}

/// Whether scanning should go on after a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop
}

#[derive(Debug, Default)]
struct CteScanner {
    depth:   usize,
    mode:    CteMode,
    current: Option<String>,
    names:   NameSet
}

impl CteScanner {
    fn on_word(&mut self, word: &str) -> Step {
        if self.depth > 0 {
            return Step::Continue;
        }
        match word.to_ascii_uppercase().as_str() {
            "SELECT" => return Step::Stop,
            "AS" => self.mode = CteMode::ExpectBody,
            "WITH" | "RECURSIVE" => {}
            _ => {
                if self.mode == CteMode::Name {
                    self.current = Some(word.to_lowercase());
                }
            }
        }
        Step::Continue
    }

    fn on_open(&mut self) {
        if self.depth == 0 {
            self.mode = match self.mode {
                CteMode::ExpectBody => {
                    if let Some(name) = self.current.take() {
                        self.names.insert(CompactString::from(name));
                    }
                    CteMode::Body
                }
                CteMode::Name if self.current.is_some() => CteMode::ColumnList,
                _ => CteMode::Body
            };
        }
        self.depth += 1;
    }

    fn on_close(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        if self.depth == 0 {
            if self.mode != CteMode::ColumnList {
                self.current = None;
            }
            self.mode = CteMode::Name;
        }
    }

    fn on_comma(&mut self) {
        if self.depth == 0 {
            self.mode = CteMode::Name;
            self.current = None;
        }
    }
}

/// Collect the names bound by a leading `WITH` clause.
///
/// Expects comment-free text with single-quoted literals neutralized. Names
/// are lower-cased; backtick and double quotes are dropped. Returns an empty
/// set when the statement does not start with `WITH`.
///
/// ```
/// use sql_query_advisor::query::extract_cte_names;
///
/// let names = extract_cte_names("WITH a AS (SELECT 1), B AS (SELECT (2)) SELECT * FROM a, b");
/// assert_eq!(names.iter().map(|n| n.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
#[must_use]
pub fn extract_cte_names(sql: &str) -> NameSet {
    if !starts_with_keyword(sql.trim_start(), "WITH") {
        return NameSet::new();
    }
    let mut scanner = CteScanner::default();
    let mut pos = 0;
    while let Some(c) = sql[pos..].chars().next() {
        let mut next = pos + c.len_utf8();
        match c {
            '(' => scanner.on_open(),
            ')' => scanner.on_close(),
            ',' => scanner.on_comma(),
            '`' | '"' => {
                let close = sql[next..].find(c).map_or(sql.len(), |i| next + i);
                if scanner.depth == 0 {
                    scanner.on_word(&sql[next..close]);
                }
                next = (close + 1).min(sql.len());
            }
            c if is_word_char(c) => {
                let end = sql[pos..]
                    .find(|ch: char| !is_word_char(ch))
                    .map_or(sql.len(), |i| pos + i);
                if scanner.on_word(&sql[pos..end]) == Step::Stop {
                    break;
                }
                next = end;
            }
            _ => {}
        }
        pos = next;
    }
    scanner.names
}

/// Return the statement from its first depth-0 `SELECT` on.
///
/// Expects comment-free text that still holds its literals; quotes and
/// backslash escapes are tracked here so parentheses inside literals do not
/// move the depth. Statements that do not start with `WITH`, or whose main
/// `SELECT` cannot be found, come back unchanged.
///
/// ```
/// use sql_query_advisor::query::extract_main_query;
///
/// let sql = "WITH x AS (SELECT ')' AS p) SELECT * FROM x";
/// assert_eq!(extract_main_query(sql), "SELECT * FROM x");
/// ```
#[must_use]
pub fn extract_main_query(sql: &str) -> &str {
    if !starts_with_keyword(sql.trim_start(), "WITH") {
        return sql;
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in sql.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            's' | 'S'
                if depth == 0 && at_word_start(sql, i) && starts_with_keyword(&sql[i..], "SELECT") =>
            {
                return &sql[i..];
            }
            _ => {}
        }
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sql: &str) -> Vec<String> {
        extract_cte_names(sql)
            .into_iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_no_with_returns_empty() {
        assert!(names("SELECT * FROM t").is_empty());
    }

    #[test]
    fn test_single_cte() {
        assert_eq!(names("WITH x AS (SELECT 1) SELECT * FROM x"), vec!["x"]);
    }

    #[test]
    fn test_multiple_ctes_lowercased() {
        let sql = "WITH Recent AS (SELECT id FROM a), totals AS (SELECT count(*) FROM (SELECT 1)) SELECT * FROM recent";
        assert_eq!(names(sql), vec!["recent", "totals"]);
    }

    #[test]
    fn test_recursive_cte() {
        let sql = "WITH RECURSIVE tree AS (SELECT 1 UNION ALL SELECT n + 1 FROM tree) SELECT * FROM tree";
        assert_eq!(names(sql), vec!["tree"]);
    }

    #[test]
    fn test_cte_with_column_list() {
        let sql = "WITH pairs(a, b) AS (SELECT 1, 2) SELECT a FROM pairs";
        assert_eq!(names(sql), vec!["pairs"]);
    }

    #[test]
    fn test_quoted_cte_name() {
        let sql = "WITH `Daily` AS (SELECT 1), \"weekly\" AS (SELECT 2) SELECT 1";
        assert_eq!(names(sql), vec!["daily", "weekly"]);
    }

    #[test]
    fn test_clickhouse_scalar_with_is_not_a_cte() {
        let sql = "WITH (SELECT max(ts) FROM events) AS latest SELECT * FROM events WHERE ts = latest";
        assert!(names(sql).is_empty());
    }

    #[test]
    fn test_main_query_without_with_is_unchanged() {
        let sql = "  SELECT 1";
        assert_eq!(extract_main_query(sql), sql);
    }

    #[test]
    fn test_main_query_skips_nested_selects() {
        let sql = "WITH a AS (SELECT (SELECT 1)), b AS (SELECT 2) SELECT a.x FROM a JOIN b ON 1";
        assert_eq!(extract_main_query(sql), "SELECT a.x FROM a JOIN b ON 1");
    }

    #[test]
    fn test_main_query_ignores_cte_named_like_keyword() {
        let sql = "WITH select_rows AS (SELECT 1) SELECT * FROM select_rows";
        assert_eq!(extract_main_query(sql), "SELECT * FROM select_rows");
    }

    #[test]
    fn test_main_query_missing_select_falls_back() {
        let sql = "WITH x AS (SELECT 1) INSERT INTO t SELECT * FROM x";
        assert_eq!(extract_main_query(sql), "SELECT * FROM x");
        let sql = "WITH x AS (SELECT 1) DELETE FROM t";
        assert_eq!(extract_main_query(sql), sql);
    }
}
