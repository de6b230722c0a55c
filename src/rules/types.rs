//! Type definitions for the recommendation rule system.
//!
//! - [`Severity`] - Recommendation tiers (Info, Warning, Critical)
//! - [`RuleInfo`] - Static rule metadata
//! - [`PerformanceRecommendation`] - One fired rule
//! - [`RuleContext`] - Everything a rule may inspect

use serde::{Deserialize, Serialize};

use crate::{
    preprocessor::{neutralize_string_literals, remove_comments},
    query::QueryMetrics
};

/// Severity tier of a recommendation.
///
/// Ordered from lowest to highest so that a descending stable sort puts
/// critical recommendations first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, rarely urgent
    Info,
    /// Likely to hurt on large tables (exit code 1)
    Warning,
    /// Should be fixed before the query runs in production (exit code 2)
    Critical
}

impl Severity {
    /// Output position of the tier: critical `0`, warning `1`, info `2`
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 1,
            Self::Info => 2
        }
    }

    /// Parse a configured severity name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" | "error" => Some(Self::Critical),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Critical => write!(f, "CRITICAL")
        }
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    /// Stable identifier (e.g. "select-star")
    pub id:       &'static str,
    /// Short human-readable title
    pub title:    &'static str,
    /// Default tier
    pub severity: Severity
}

impl RuleInfo {
    /// Build the recommendation this rule emits
    pub fn recommend(
        &self,
        description: impl Into<String>,
        suggestion: Option<&str>
    ) -> PerformanceRecommendation {
        PerformanceRecommendation {
            id:          self.id,
            severity:    self.severity,
            title:       self.title,
            description: description.into(),
            suggestion:  suggestion.map(str::to_string)
        }
    }
}

/// A single fired rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceRecommendation {
    /// Identifier of the rule that produced it
    pub id:          &'static str,
    pub severity:    Severity,
    pub title:       &'static str,
    /// What was found, with the numbers that triggered it
    pub description: String,
    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion:  Option<String>
}

/// Input shared by every rule evaluated against one statement.
///
/// Both text views are ASCII-uppercased, which keeps their byte offsets
/// aligned: a range found in one is valid in the other.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub metrics: &'a QueryMetrics,
    normalized:  String,
    neutralized: String
}

impl<'a> RuleContext<'a> {
    pub fn new(sql: &str, metrics: &'a QueryMetrics) -> Self {
        let stripped = remove_comments(sql);
        let neutralized = neutralize_string_literals(&stripped).to_ascii_uppercase();
        Self {
            metrics,
            normalized: stripped.to_ascii_uppercase(),
            neutralized
        }
    }

    /// Statement without comments, literals intact
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Statement without comments, literal contents blanked
    pub fn neutralized(&self) -> &str {
        &self.neutralized
    }
}
