use std::time::{Duration, Instant};

use sql_query_advisor::{
    ComplexityLevel, QueryAnalyzer, analyze_query, query::extract_metrics, rules::Severity
};

fn ids(sql: &str) -> Vec<&'static str> {
    analyze_query(sql).recommendations.iter().map(|r| r.id).collect()
}

#[test]
fn test_cte_names_are_not_tables() {
    let result = analyze_query("WITH x AS (SELECT 1) SELECT * FROM x");
    assert_eq!(result.complexity.metrics().table_count, 0);
}

#[test]
fn test_select_star() {
    let result = analyze_query("SELECT * FROM t");
    let metrics = result.complexity.metrics();
    assert!(metrics.is_select_star);
    assert_eq!(metrics.column_count, 0);
    let star = result
        .recommendations
        .iter()
        .find(|r| r.id == "select-star")
        .unwrap();
    assert_eq!(star.severity, Severity::Critical);
}

#[test]
fn test_order_by_without_limit() {
    let found = ids("SELECT a,b,c FROM t ORDER BY a");
    assert!(found.contains(&"order-without-limit"));
    assert!(found.contains(&"missing-limit"));
}

#[test]
fn test_three_joins() {
    let sql = "SELECT a FROM t1 JOIN t2 ON t1.id=t2.id JOIN t3 ON t2.id=t3.id JOIN t4 ON t3.id=t4.id";
    assert_eq!(analyze_query(sql).complexity.metrics().join_count, 3);
    assert!(ids(sql).contains(&"large-join"));
}

#[test]
fn test_scalar_subquery_depth() {
    assert_eq!(extract_metrics("SELECT (SELECT (SELECT 1))").subquery_depth, 2);
}

#[test]
fn test_comment_does_not_change_metrics() {
    let sql = "SELECT a, count(*) FROM t JOIN u ON t.id = u.id WHERE b > 1 GROUP BY a ORDER BY a LIMIT 10";
    let commented = "SELECT a, count(*) -- per user\nFROM t JOIN u ON t.id = u.id /* filter */ WHERE b > 1 \
                     GROUP BY a ORDER BY a LIMIT 10 -- done";
    assert_eq!(extract_metrics(sql), extract_metrics(commented));
    assert_eq!(analyze_query(sql), analyze_query(commented));
}

#[test]
fn test_idempotent() {
    let sql = "WITH r AS (SELECT * FROM e) SELECT DISTINCT a, b FROM r, u WHERE a LIKE '%z' ORDER BY a";
    let first = serde_json::to_string(&analyze_query(sql)).unwrap();
    let second = serde_json::to_string(&analyze_query(sql)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_clean_query_has_no_recommendations() {
    let result = analyze_query("SELECT id, name FROM users PREWHERE id = 42 LIMIT 1");
    assert!(result.recommendations.is_empty());
    assert_eq!(result.complexity.level(), ComplexityLevel::Low);
}

#[test]
fn test_high_complexity() {
    let sql = "SELECT DISTINCT a, sum(b), avg(c), count(d), max(e) \
               FROM t1 JOIN t2 ON t1.id = t2.id JOIN t3 ON t2.id = t3.id JOIN t4 ON t3.id = t4.id \
               WHERE id IN (SELECT id FROM x WHERE id IN (SELECT id FROM y)) \
               GROUP BY a ORDER BY a LIMIT 10";
    let complexity = analyze_query(sql).complexity;
    assert_eq!(complexity.metrics().subquery_depth, 2);
    assert!(complexity.score() >= 60, "score {}", complexity.score());
    assert_eq!(complexity.level(), ComplexityLevel::High);
}

#[test]
fn test_malformed_sql_degrades() {
    for sql in [
        "SELECT (((",
        "SELECT 'unterminated FROM t",
        "/* never closed",
        ")))) SELECT FROM",
        "WITH",
        "ÜNICODE ✓ SELECT ☃ FROM ❄"
    ] {
        let result = analyze_query(sql);
        assert!(result.complexity.score() <= 100);
    }
}

#[test]
fn test_json_contract_field_names() {
    let json = serde_json::to_value(analyze_query("SELECT * FROM t")).unwrap();
    let metrics = &json["complexity"]["metrics"];
    for field in [
        "tableCount",
        "joinCount",
        "subqueryDepth",
        "aggregationCount",
        "hasDistinct",
        "hasGroupBy",
        "hasOrderBy",
        "hasLimit",
        "hasPrewhere",
        "hasWhere",
        "isSelectStar",
        "columnCount"
    ] {
        assert!(metrics.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["complexity"]["score"], 15);
    assert_eq!(json["complexity"]["level"], "low");
    assert!(json["recommendations"][0].get("suggestion").is_some());
}

#[test]
fn test_shared_analyzer_across_threads() {
    let analyzer = QueryAnalyzer::new();
    std::thread::scope(|s| {
        for i in 0..4 {
            let analyzer = &analyzer;
            s.spawn(move || {
                let sql = format!("SELECT c{i} FROM t LIMIT 1");
                assert!(analyzer.analyze(&sql).recommendations.is_empty());
            });
        }
    });
}

fn assert_analyzes_quickly(sql: &str) {
    let started = Instant::now();
    let result = analyze_query(sql);
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_secs(10), "{} bytes took {elapsed:?}", sql.len());
    assert!(result.complexity.score() <= 100);
}

#[test]
fn test_repeated_from_keywords_scale_linearly() {
    assert_analyzes_quickly(&"FROM a ".repeat(15_000));
    assert_analyzes_quickly(&format!("SELECT x {}", "FROM a, b ".repeat(10_000)));
}

#[test]
fn test_unclosed_parens_scale_linearly() {
    assert_analyzes_quickly(&"FROM (".repeat(17_000));
    assert_analyzes_quickly(&"IN (".repeat(25_000));
    assert_analyzes_quickly(&"(SELECT ".repeat(12_000));
}

#[test]
fn test_long_in_list_is_measured() {
    let values: Vec<String> = (0..20_000).map(|i| i.to_string()).collect();
    let sql = format!("SELECT a FROM t WHERE x IN ({}) LIMIT 1", values.join(", "));
    assert_analyzes_quickly(&sql);
    assert!(ids(&sql).contains(&"large-in-list"));
}
