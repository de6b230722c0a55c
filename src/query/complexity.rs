//! Complexity scoring.
//!
//! | Component | Points | Cap |
//! |-----------|--------|-----|
//! | tables | 5 each | 20 |
//! | joins | 5 each | 15 |
//! | subquery depth | 10 per level | 20 |
//! | aggregations | 3 each | 10 |
//! | `DISTINCT` | 5 | |
//! | `GROUP BY` | 5 | |
//! | `ORDER BY` | 3 | |
//! | `SELECT *` | 10 | |
//! | columns | 5 above 10, 10 above 20 | |
//!
//! The sum is clamped to `0..=100`. Below [`LOW_THRESHOLD`] is low, below
//! [`MEDIUM_THRESHOLD`] medium, anything else high.

use super::types::{ComplexityLevel, QueryMetrics};

/// Scores below this are [`ComplexityLevel::Low`]
pub const LOW_THRESHOLD: u32 = 30;
/// Scores below this are at most [`ComplexityLevel::Medium`]
pub const MEDIUM_THRESHOLD: u32 = 60;
pub const MAX_SCORE: u32 = 100;

const TABLE_POINTS: u32 = 5;
const TABLE_CAP: u32 = 20;
const JOIN_POINTS: u32 = 5;
const JOIN_CAP: u32 = 15;
const SUBQUERY_POINTS: u32 = 10;
const SUBQUERY_CAP: u32 = 20;
const AGGREGATION_POINTS: u32 = 3;
const AGGREGATION_CAP: u32 = 10;
const DISTINCT_POINTS: u32 = 5;
const GROUP_BY_POINTS: u32 = 5;
const ORDER_BY_POINTS: u32 = 3;
const SELECT_STAR_POINTS: u32 = 10;

/// `count * points`, never above `cap`
fn capped(count: usize, points: u32, cap: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(points)
        .min(cap)
}

fn flag(set: bool, points: u32) -> u32 {
    if set { points } else { 0 }
}

fn column_points(column_count: usize) -> u32 {
    if column_count > 20 {
        10
    } else if column_count > 10 {
        5
    } else {
        0
    }
}

/// Weighted, per-component capped score in `0..=100`
#[must_use]
pub fn calculate_score(metrics: &QueryMetrics) -> u32 {
    let score = capped(metrics.table_count, TABLE_POINTS, TABLE_CAP)
        + capped(metrics.join_count, JOIN_POINTS, JOIN_CAP)
        + capped(metrics.subquery_depth, SUBQUERY_POINTS, SUBQUERY_CAP)
        + capped(metrics.aggregation_count, AGGREGATION_POINTS, AGGREGATION_CAP)
        + flag(metrics.has_distinct, DISTINCT_POINTS)
        + flag(metrics.has_group_by, GROUP_BY_POINTS)
        + flag(metrics.has_order_by, ORDER_BY_POINTS)
        + flag(metrics.is_select_star, SELECT_STAR_POINTS)
        + column_points(metrics.column_count);
    score.min(MAX_SCORE)
}

#[must_use]
pub fn level_for_score(score: u32) -> ComplexityLevel {
    if score < LOW_THRESHOLD {
        ComplexityLevel::Low
    } else if score < MEDIUM_THRESHOLD {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::High
    }
}
