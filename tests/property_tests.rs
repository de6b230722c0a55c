use proptest::prelude::*;
use sql_query_advisor::{
    ComplexityLevel, analyze_query,
    query::{
        QueryComplexity, QueryMetrics,
        complexity::{LOW_THRESHOLD, MEDIUM_THRESHOLD, level_for_score}
    }
};

/// SQL-ish fragments that exercise every extractor
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "SELECT", "*", "a", "b,", "count(x)", "sum(y),", "FROM", "t1", "t2,", "JOIN", "LEFT JOIN",
        "ON", "a = b", "WHERE", "PREWHERE", "(", ")", "(SELECT", "GROUP BY", "ORDER BY", "LIMIT 5",
        "DISTINCT", "WITH", "cte AS", "UNION", "OR", "NOT IN", "LIKE '%x'", "'str'", "\"id\"",
        "`bt`", "--", "\n", "/*", "*/", ";", "FINAL", "IN (1, 2)"
    ])
}

fn sql_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(fragment(), 0..40).prop_map(|parts| parts.join(" ")),
        any::<String>()
    ]
}

fn metrics_strategy() -> impl Strategy<Value = QueryMetrics> {
    (
        (0usize..50, 0usize..50, 0usize..50, 0usize..50, 0usize..100),
        prop::collection::vec(any::<bool>(), 7)
    )
        .prop_map(|((tables, joins, depth, aggregations, columns), flags)| QueryMetrics {
            table_count: tables,
            join_count: joins,
            subquery_depth: depth,
            aggregation_count: aggregations,
            has_distinct: flags[0],
            has_group_by: flags[1],
            has_order_by: flags[2],
            has_limit: flags[3],
            has_prewhere: flags[4],
            has_where: flags[5],
            is_select_star: flags[6],
            column_count: columns
        })
}

fn expected_level(score: u32) -> ComplexityLevel {
    if score < LOW_THRESHOLD {
        ComplexityLevel::Low
    } else if score < MEDIUM_THRESHOLD {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::High
    }
}

proptest! {
    #[test]
    fn score_is_bounded(sql in sql_strategy()) {
        let result = analyze_query(&sql);
        prop_assert!(result.complexity.score() <= 100);
    }

    #[test]
    fn level_follows_score(sql in sql_strategy()) {
        let complexity = analyze_query(&sql).complexity;
        prop_assert_eq!(complexity.level(), expected_level(complexity.score()));
    }

    #[test]
    fn level_follows_score_for_any_metrics(metrics in metrics_strategy()) {
        let complexity = QueryComplexity::from_metrics(metrics);
        prop_assert!(complexity.score() <= 100);
        prop_assert_eq!(complexity.level(), level_for_score(complexity.score()));
        prop_assert_eq!(complexity.level(), expected_level(complexity.score()));
    }

    #[test]
    fn recommendations_are_ordered_by_tier(sql in sql_strategy()) {
        let result = analyze_query(&sql);
        for pair in result.recommendations.windows(2) {
            prop_assert!(pair[0].severity.rank() <= pair[1].severity.rank());
        }
    }

    #[test]
    fn analysis_is_idempotent(sql in sql_strategy()) {
        prop_assert_eq!(analyze_query(&sql), analyze_query(&sql));
    }

    #[test]
    fn rule_ids_are_unique(sql in sql_strategy()) {
        let result = analyze_query(&sql);
        let mut ids: Vec<&str> = result.recommendations.iter().map(|r| r.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn trailing_comment_does_not_change_metrics(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "SELECT", "a,", "b", "FROM", "t", "JOIN u ON t.id = u.id", "WHERE x = 1",
                "GROUP BY a", "ORDER BY b", "LIMIT 3", "count(c)"
            ]),
            1..20
        )
    ) {
        let sql = parts.join(" ");
        let commented = format!("{sql} -- trailing note");
        let plain = analyze_query(&sql);
        let noted = analyze_query(&commented);
        prop_assert_eq!(plain.complexity.metrics(), noted.complexity.metrics());
    }
}
