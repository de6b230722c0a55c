//! Structural metric extraction.
//!
//! The pipeline for one statement:
//!
//! ```text
//! sql ─▶ remove_comments ─┬─▶ neutralize ' ─▶ extract_cte_names ─┐
//!                         │                 └▶ extract_tables ◀──┘
//!                         └─▶ extract_main_query ─▶ neutralize ─▶ joins, aggregations,
//!                                               │                 columns, clauses
//!                                               └─▶ count_subquery_depth
//! ```
//!
//! Every step is a total function; malformed SQL yields zero counts rather
//! than an error.

pub mod complexity;
mod extract;
mod types;

pub use extract::{
    AGGREGATE_FUNCTIONS, ClauseFlags, JOIN_MODIFIERS, TABLE_CLAUSE_KEYWORDS, clause_body,
    count_aggregations, count_columns, count_joins, count_subquery_depth, detect_clauses,
    extract_cte_names, extract_main_query, extract_select_clause, extract_tables, is_select_star
};
pub use types::{ComplexityLevel, NameSet, QueryComplexity, QueryMetrics, QueryStructure};

use crate::preprocessor::{neutralize_single_quoted, neutralize_string_literals, remove_comments};

/// Run the full extraction pipeline over one statement
#[must_use]
pub fn extract_structure(sql: &str) -> QueryStructure {
    let stripped = remove_comments(sql);
    let identifiers = neutralize_single_quoted(&stripped);
    let cte_names = extract_cte_names(&identifiers);
    let tables = extract_tables(&identifiers, &cte_names);
    let main_query = extract_main_query(&stripped);
    let neutral_main = neutralize_string_literals(main_query);
    let clauses = detect_clauses(&neutral_main);
    let is_select_star = is_select_star(&neutral_main);
    let metrics = QueryMetrics {
        table_count: tables.len(),
        join_count: count_joins(&neutral_main),
        subquery_depth: count_subquery_depth(main_query),
        aggregation_count: count_aggregations(&neutral_main),
        has_distinct: clauses.has_distinct,
        has_group_by: clauses.has_group_by,
        has_order_by: clauses.has_order_by,
        has_limit: clauses.has_limit,
        has_prewhere: clauses.has_prewhere,
        has_where: clauses.has_where,
        is_select_star,
        column_count: if is_select_star {
            0
        } else {
            count_columns(&neutral_main)
        }
    };
    QueryStructure {
        cte_names,
        tables,
        main_query: main_query.trim().to_string(),
        metrics
    }
}

/// Structural metrics of one statement
///
/// ```
/// use sql_query_advisor::query::extract_metrics;
///
/// let metrics = extract_metrics("WITH x AS (SELECT 1) SELECT * FROM x");
/// assert_eq!(metrics.table_count, 0);
/// assert!(metrics.is_select_star);
/// ```
#[must_use]
pub fn extract_metrics(sql: &str) -> QueryMetrics {
    extract_structure(sql).metrics
}
