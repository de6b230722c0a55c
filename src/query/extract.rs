//! Heuristic extractors, one per structural metric.
//!
//! None of these build a grammar-level AST. Each works on comment-free text
//! and degrades to an empty set, zero, `false` or the unchanged input when it
//! cannot make sense of the statement.

mod aggregates;
mod clauses;
mod columns;
mod cte;
mod joins;
mod subquery;
mod table;

pub use aggregates::{AGGREGATE_FUNCTIONS, count_aggregations};
pub use clauses::{ClauseFlags, clause_body, detect_clauses};
pub use columns::{count_columns, extract_select_clause, is_select_star};
pub use cte::{extract_cte_names, extract_main_query};
pub use joins::{JOIN_MODIFIERS, count_joins};
pub use subquery::count_subquery_depth;
pub use table::{TABLE_CLAUSE_KEYWORDS, extract_tables};

/// Identifier character
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive check that `text` opens with the whole word `keyword`.
///
/// `keyword` must be ASCII.
pub(crate) fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    let len = keyword.len();
    text.len() >= len
        && text.as_bytes()[..len].eq_ignore_ascii_case(keyword.as_bytes())
        && !text[len..].chars().next().is_some_and(is_word_char)
}

/// Whether a word may start at byte `pos` of `text`
pub(crate) fn at_word_start(text: &str, pos: usize) -> bool {
    !text[..pos].chars().next_back().is_some_and(is_word_char)
}

/// Length of the parenthesis-balanced prefix of `text`.
///
/// The prefix ends at the first `)` that closes a paren opened before `text`,
/// at a `;`, or at a depth-0 word listed in `terminators` (uppercase).
/// Expects string-neutralized input.
pub(crate) fn top_level_end(text: &str, terminators: &[&str]) -> usize {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return i,
            ')' => depth -= 1,
            ';' if depth == 0 => return i,
            c if depth == 0
                && is_word_char(c)
                && at_word_start(text, i)
                && terminators
                    .iter()
                    .any(|kw| starts_with_keyword(&text[i..], kw)) =>
            {
                return i;
            }
            _ => {}
        }
    }
    text.len()
}

/// Split on `separator` where it appears outside any parentheses
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_keyword() {
        assert!(starts_with_keyword("select 1", "SELECT"));
        assert!(starts_with_keyword("SELECT", "SELECT"));
        assert!(starts_with_keyword("SELECT(1)", "SELECT"));
        assert!(!starts_with_keyword("selected", "SELECT"));
        assert!(!starts_with_keyword("select_data", "SELECT"));
        assert!(!starts_with_keyword("SEL", "SELECT"));
    }

    #[test]
    fn test_top_level_end_stops_at_keyword() {
        let text = "a, f(b, c) WHERE x";
        assert_eq!(&text[..top_level_end(text, &["WHERE"])], "a, f(b, c) ");
    }

    #[test]
    fn test_top_level_end_stops_at_unmatched_paren() {
        let text = "t1, t2) AS sub";
        assert_eq!(&text[..top_level_end(text, &["WHERE"])], "t1, t2");
    }

    #[test]
    fn test_top_level_end_ignores_keyword_inside_parens() {
        let text = "(SELECT 1 WHERE y) WHERE x";
        assert_eq!(&text[..top_level_end(text, &["WHERE"])], "(SELECT 1 WHERE y) ");
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("a, f(b, c), d", ','), vec!["a", " f(b, c)", " d"]);
    }
}
