use super::starts_with_keyword;

/// Lexical state of the subquery depth scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ScanState {
    #[default]
    Code,
    Quoted {
        quote:   char,
        escaped: bool
    }
}

/// Depth counter over `(SELECT` openings.
///
/// Only a `(` directly followed by `SELECT` raises the depth. Every `)`
/// outside a literal lowers it while it is positive.
#[derive(Debug, Default)]
struct SubqueryScanner {
    state:     ScanState,
    depth:     usize,
    max_depth: usize
}

impl SubqueryScanner {
    /// Advance over `c`; `rest` is the text after it
    fn step(&mut self, c: char, rest: &str) {
        self.state = match self.state {
            ScanState::Quoted {
                quote,
                escaped: false
            } if c == '\\' => ScanState::Quoted {
                quote,
                escaped: true
            },
            ScanState::Quoted {
                quote,
                escaped: false
            } if c == quote => ScanState::Code,
            ScanState::Quoted {
                quote, ..
            } => ScanState::Quoted {
                quote,
                escaped: false
            },
            ScanState::Code => match c {
                '\'' | '"' | '`' => ScanState::Quoted {
                    quote:   c,
                    escaped: false
                },
                '(' => {
                    if starts_with_keyword(rest.trim_start(), "SELECT") {
                        self.depth += 1;
                        self.max_depth = self.max_depth.max(self.depth);
                    }
                    ScanState::Code
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    ScanState::Code
                }
                _ => ScanState::Code
            }
        };
    }
}

/// Maximum nesting depth of `(SELECT ...)` in the main query.
///
/// Works on text that still holds its literals, tracking quotes and
/// backslash escapes itself.
///
/// ```
/// use sql_query_advisor::query::count_subquery_depth;
///
/// assert_eq!(count_subquery_depth("SELECT (SELECT (SELECT 1))"), 2);
/// ```
#[must_use]
pub fn count_subquery_depth(sql: &str) -> usize {
    let mut scanner = SubqueryScanner::default();
    for (i, c) in sql.char_indices() {
        scanner.step(c, &sql[i + c.len_utf8()..]);
    }
    scanner.max_depth
}
