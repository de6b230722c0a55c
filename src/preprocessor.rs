//! Text normalization ahead of structural scanning.
//!
//! Every extractor in [`crate::query`] works on text that went through this
//! module first:
//!
//! 1. [`remove_comments`] drops `-- ...` line comments and `/* ... */` block
//!    comments that sit outside string literals.
//! 2. [`neutralize_string_literals`] overwrites the contents of `'...'` and
//!    `"..."` literals with filler so that keywords or parentheses inside a
//!    literal never match. The output has exactly the same byte length as the
//!    input, so byte offsets found in the neutralized copy are valid in the
//!    original text too.
//!
//! Both functions are total: unterminated comments and literals simply run to
//! the end of input.
//!
//! # Example
//!
//! ```
//! use sql_query_advisor::preprocessor::{neutralize_string_literals, remove_comments};
//!
//! let sql = "SELECT a -- note\nFROM t WHERE b = 'x FROM y'";
//! let stripped = remove_comments(sql);
//! assert_eq!(stripped, "SELECT a \nFROM t WHERE b = 'x FROM y'");
//!
//! let neutral = neutralize_string_literals(&stripped);
//! assert_eq!(neutral.len(), stripped.len());
//! assert!(!neutral.contains("x FROM y"));
//! ```

/// Character written over every byte of a neutralized literal.
pub const STRING_FILLER: char = 'x';

const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Lexical position of a scanner walking raw SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    Quoted(char),
    LineComment,
    BlockComment
}

/// Remove `--` line comments and `/* */` block comments.
///
/// Line comments keep their terminating newline. A block comment is replaced
/// by a single space so that `a/*x*/b` does not glue two tokens together.
#[must_use]
pub fn remove_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut state = LexState::Code;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            LexState::Code => match c {
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = LexState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = LexState::BlockComment;
                }
                q if QUOTES.contains(&q) => {
                    state = LexState::Quoted(q);
                    out.push(q);
                }
                _ => out.push(c)
            },
            LexState::Quoted(q) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    state = LexState::Code;
                }
            }
            LexState::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = LexState::Code;
                }
            }
            LexState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push(' ');
                    state = LexState::Code;
                }
            }
        }
    }
    out
}

/// Blank out the contents of single- and double-quoted literals.
///
/// Quote characters stay in place; the contents become [`STRING_FILLER`].
/// Backtick identifiers are left untouched.
#[must_use]
pub fn neutralize_string_literals(sql: &str) -> String {
    neutralize(sql, &['\'', '"'])
}

/// Blank out single-quoted literals only.
///
/// Double-quoted and backtick identifiers survive, which is what table name
/// extraction needs.
#[must_use]
pub fn neutralize_single_quoted(sql: &str) -> String {
    neutralize(sql, &['\''])
}

fn neutralize(sql: &str, filled: &[char]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut open: Option<char> = None;
    let mut chars = sql.chars();
    while let Some(c) = chars.next() {
        match open {
            None => {
                if QUOTES.contains(&c) {
                    open = Some(c);
                }
                out.push(c);
            }
            Some(q) if c == q => {
                open = None;
                out.push(c);
            }
            Some(q) => {
                let fill = filled.contains(&q);
                push_content(&mut out, c, fill);
                if c == '\\'
                    && let Some(escaped) = chars.next()
                {
                    push_content(&mut out, escaped, fill);
                }
            }
        }
    }
    out
}

fn push_content(out: &mut String, c: char, fill: bool) {
    if fill {
        for _ in 0..c.len_utf8() {
            out.push(STRING_FILLER);
        }
    } else {
        out.push(c);
    }
}

/// Split a script into individual statements on `;`.
///
/// Semicolons inside literals or comments do not split. Statements that are
/// empty once comments are removed are dropped. Each returned statement is
/// trimmed but otherwise verbatim, comments included.
#[must_use]
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = LexState::Code;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            LexState::Code => match c {
                ';' => {
                    push_statement(&mut statements, &current);
                    current.clear();
                    continue;
                }
                '-' if chars.peek() == Some(&'-') => state = LexState::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    current.push(c);
                    if let Some(star) = chars.next() {
                        current.push(star);
                    }
                    state = LexState::BlockComment;
                    continue;
                }
                q if QUOTES.contains(&q) => state = LexState::Quoted(q),
                _ => {}
            },
            LexState::Quoted(q) => {
                if c == '\\' {
                    current.push(c);
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                    continue;
                }
                if c == q {
                    state = LexState::Code;
                }
            }
            LexState::LineComment => {
                if c == '\n' {
                    state = LexState::Code;
                }
            }
            LexState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    current.push(c);
                    if let Some(slash) = chars.next() {
                        current.push(slash);
                    }
                    state = LexState::Code;
                    continue;
                }
            }
        }
        current.push(c);
    }
    push_statement(&mut statements, &current);
    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    if !remove_comments(raw).trim().is_empty() {
        statements.push(raw.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_line_comment() {
        let sql = "SELECT a -- trailing\nFROM t";
        assert_eq!(remove_comments(sql), "SELECT a \nFROM t");
    }

    #[test]
    fn test_remove_block_comment() {
        let sql = "SELECT a/* hidden FROM x */FROM t";
        assert_eq!(remove_comments(sql), "SELECT a FROM t");
    }

    #[test]
    fn test_unterminated_block_comment_consumes_rest() {
        assert_eq!(remove_comments("SELECT 1 /* never closed"), "SELECT 1 ");
    }

    #[test]
    fn test_comment_markers_inside_literal_survive() {
        let sql = "SELECT '-- not a comment', '/* nor this */' FROM t";
        assert_eq!(remove_comments(sql), sql);
    }

    #[test]
    fn test_neutralize_preserves_length_and_quotes() {
        let sql = "SELECT * FROM t WHERE a = 'SELECT (' AND b = \"x\"";
        let neutral = neutralize_string_literals(sql);
        assert_eq!(neutral.len(), sql.len());
        assert_eq!(neutral, "SELECT * FROM t WHERE a = 'xxxxxxxx' AND b = \"x\"");
    }

    #[test]
    fn test_neutralize_multibyte_keeps_byte_length() {
        let sql = "SELECT 'héllo'";
        let neutral = neutralize_string_literals(sql);
        assert_eq!(neutral.len(), sql.len());
        assert!(neutral.is_ascii());
    }

    #[test]
    fn test_neutralize_backslash_escape() {
        let sql = r"SELECT 'it\'s (' FROM t";
        let neutral = neutralize_string_literals(sql);
        assert_eq!(neutral.len(), sql.len());
        assert!(neutral.ends_with("' FROM t"));
        assert!(!neutral.contains('('));
    }

    #[test]
    fn test_neutralize_single_quoted_keeps_identifiers() {
        let sql = "SELECT \"col\" FROM \"users\" WHERE x = 'v'";
        assert_eq!(
            neutralize_single_quoted(sql),
            "SELECT \"col\" FROM \"users\" WHERE x = 'x'"
        );
    }

    #[test]
    fn test_unterminated_literal_runs_to_end() {
        let neutral = neutralize_string_literals("SELECT 'abc");
        assert_eq!(neutral, "SELECT 'xxx");
    }

    #[test]
    fn test_split_statements() {
        let sql = "SELECT 1; SELECT ';' FROM t; -- done;\n";
        let statements = split_statements(sql);
        assert_eq!(statements, vec!["SELECT 1", "SELECT ';' FROM t"]);
    }

    #[test]
    fn test_split_statements_block_comment() {
        let sql = "SELECT /* ; */ 1;;";
        assert_eq!(split_statements(sql), vec!["SELECT /* ; */ 1"]);
    }
}
