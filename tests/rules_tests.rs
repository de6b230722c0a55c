use std::collections::HashMap;

use sql_query_advisor::{
    config::RulesConfig,
    query::{QueryMetrics, extract_metrics},
    rules::{RuleContext, RuleRunner, Severity, generate_recommendations}
};

fn rule_ids(sql: &str) -> Vec<&'static str> {
    generate_recommendations(sql, &extract_metrics(sql))
        .iter()
        .map(|r| r.id)
        .collect()
}

#[test]
fn test_select_star() {
    assert!(rule_ids("SELECT * FROM users").contains(&"select-star"));
    assert!(rule_ids("SELECT DISTINCT * FROM users LIMIT 1").contains(&"select-star"));
    assert!(!rule_ids("SELECT count(*) FROM users").contains(&"select-star"));
}

#[test]
fn test_order_without_limit_and_missing_limit_co_fire() {
    let ids = rule_ids("SELECT a, b, c FROM t ORDER BY a");
    assert!(ids.contains(&"order-without-limit"));
    assert!(ids.contains(&"missing-limit"));
}

#[test]
fn test_large_join() {
    let ids = rule_ids(
        "SELECT a FROM t1 JOIN t2 ON t1.id = t2.id JOIN t3 ON t2.id = t3.id JOIN t4 ON t3.id = t4.id"
    );
    assert!(ids.contains(&"large-join"));
    assert!(!rule_ids("SELECT a FROM t1 JOIN t2 ON t1.id = t2.id LIMIT 1").contains(&"large-join"));
}

#[test]
fn test_deep_nesting() {
    let sql = "SELECT a FROM t WHERE id IN (SELECT id FROM u WHERE id IN (SELECT id FROM v WHERE id IN (SELECT id FROM w)))";
    assert_eq!(extract_metrics(sql).subquery_depth, 3);
    assert!(rule_ids(sql).contains(&"deep-nesting"));
}

#[test]
fn test_cartesian_product_risk() {
    assert!(rule_ids("SELECT a FROM t1, t2 LIMIT 1").contains(&"cartesian-product-risk"));
    assert!(
        !rule_ids("SELECT a FROM t1 JOIN t2 ON t1.id = t2.id LIMIT 1")
            .contains(&"cartesian-product-risk")
    );
}

#[test]
fn test_aggregation_rules() {
    let sql = "SELECT sum(a), avg(b), min(c), max(d), count(e), uniq(f) FROM t GROUP BY g";
    let ids = rule_ids(sql);
    assert!(ids.contains(&"many-aggregations"));
    assert!(!ids.contains(&"missing-limit"));

    assert!(rule_ids("SELECT a, count(*) FROM t").contains(&"aggregation-without-group-by"));
}

#[test]
fn test_wide_distinct_and_many_columns() {
    let distinct = "SELECT DISTINCT a, b, c, d, e, f FROM t LIMIT 1";
    assert!(rule_ids(distinct).contains(&"wide-distinct"));

    let columns: Vec<String> = (0..21).map(|i| format!("c{i}")).collect();
    let wide = format!("SELECT {} FROM t LIMIT 1", columns.join(", "));
    assert!(rule_ids(&wide).contains(&"many-columns"));
}

#[test]
fn test_info_rules_from_text() {
    let sql = "SELECT a, (SELECT max(b) FROM u) FROM t FINAL \
               WHERE toDate(ts) = today() AND name LIKE '%x' AND id NOT IN (1) \
               OR a = 1 OR a = 2 OR a = 3 OR a = 4 \
               GROUP BY a, toHour(ts) \
               UNION SELECT 1, 2";
    let ids = rule_ids(sql);
    for expected in [
        "leading-wildcard",
        "negated-membership",
        "union-without-all",
        "function-on-column",
        "correlated-subquery",
        "many-or-conditions",
        "final-keyword",
        "group-by-expression"
    ] {
        assert!(ids.contains(&expected), "missing {expected} in {ids:?}");
    }
}

#[test]
fn test_comments_and_literals_do_not_trigger() {
    let ids = rule_ids("SELECT a FROM t /* FINAL */ WHERE note = 'x OR y OR z OR w OR v' LIMIT 1 -- UNION");
    assert!(!ids.contains(&"final-keyword"));
    assert!(!ids.contains(&"many-or-conditions"));
    assert!(!ids.contains(&"union-without-all"));
}

#[test]
fn test_ordering_is_by_tier_then_declaration() {
    let sql = "SELECT * FROM t WHERE name LIKE '%x' ORDER BY a";
    let recommendations = generate_recommendations(sql, &extract_metrics(sql));
    let ids: Vec<&str> = recommendations.iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        vec![
            "select-star",
            "order-without-limit",
            "prewhere-opportunity",
            "missing-limit",
            "leading-wildcard"
        ]
    );
}

#[test]
fn test_runner_lists_all_rules() {
    let rules = RuleRunner::new().rules();
    assert_eq!(rules.len(), 20);
    let critical = rules.iter().filter(|r| r.severity == Severity::Critical).count();
    let warning = rules.iter().filter(|r| r.severity == Severity::Warning).count();
    assert_eq!((critical, warning, rules.len() - critical - warning), (4, 6, 10));
}

#[test]
fn test_severity_override_reorders() {
    let mut severity = HashMap::new();
    severity.insert("missing-limit".to_string(), "critical".to_string());
    severity.insert("select-star".to_string(), "info".to_string());
    severity.insert("final-keyword".to_string(), "bogus".to_string());
    let runner = RuleRunner::with_config(RulesConfig {
        disabled: vec![],
        severity
    });

    let sql = "SELECT * FROM t FINAL";
    let metrics = extract_metrics(sql);
    let recs = runner.evaluate(&RuleContext::new(sql, &metrics));
    let ids: Vec<&str> = recs.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["missing-limit", "select-star", "final-keyword"]);
    assert_eq!(recs[1].severity, Severity::Info);
    assert_eq!(recs[2].severity, Severity::Info);
}

#[test]
fn test_rules_read_metrics_not_text() {
    let metrics = QueryMetrics {
        join_count: 5,
        has_limit: true,
        ..Default::default()
    };
    let recs = RuleRunner::new().evaluate(&RuleContext::new("SELECT 1", &metrics));
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].id, "large-join");
}

#[test]
fn test_severity_override_key_is_case_insensitive() {
    let mut severity = HashMap::new();
    severity.insert("Select-Star".to_string(), "info".to_string());
    let runner = RuleRunner::with_config(RulesConfig {
        disabled: vec![],
        severity
    });

    let star = runner
        .rules()
        .into_iter()
        .find(|r| r.id == "select-star")
        .unwrap();
    assert_eq!(star.severity, Severity::Info);
}
