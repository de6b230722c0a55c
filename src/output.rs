//! Result formatting for text, JSON and YAML output.

use colored::Colorize;
use serde::Serialize;

use crate::{
    analyzer::StatementAnalysis,
    error::{AppResult, serialization_error},
    query::{ComplexityLevel, NameSet, QueryMetrics},
    rules::{RuleInfo, Severity}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    /// Show metrics, tables and CTE names in text output
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Recommendation counts across a whole script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub statements: usize,
    pub critical:   usize,
    pub warning:    usize,
    pub info:       usize
}

impl Summary {
    pub fn from_analyses(analyses: &[StatementAnalysis]) -> Self {
        analyses.iter().fold(
            Self {
                statements: analyses.len(),
                ..Default::default()
            },
            |mut acc, analysis| {
                acc.critical += analysis.result.count(Severity::Critical);
                acc.warning += analysis.result.count(Severity::Warning);
                acc.info += analysis.result.count(Severity::Info);
                acc
            }
        )
    }
}

#[derive(Serialize)]
struct Report<'a> {
    statements: &'a [StatementAnalysis],
    summary:    Summary
}

/// Format analysis results based on output options
pub fn format_analyses(analyses: &[StatementAnalysis], opts: &OutputOptions) -> AppResult<String> {
    let report = Report {
        statements: analyses,
        summary:    Summary::from_analyses(analyses)
    };
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).map_err(|e| serialization_error("JSON", e))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&report).map_err(|e| serialization_error("YAML", e))
        }
        OutputFormat::Text => Ok(format_text(analyses, &report.summary, opts))
    }
}

/// Format the rule catalogue for the `rules` command
pub fn format_rule_catalogue(rules: &[RuleInfo], opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(rules).map_err(|e| serialization_error("JSON", e))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(rules).map_err(|e| serialization_error("YAML", e))
        }
        OutputFormat::Text => {
            let width = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
            let mut output = String::new();
            for rule in rules {
                output.push_str(&format!(
                    "{}  {:<width$}  {}\n",
                    severity_label(rule.severity, opts.colored),
                    rule.id,
                    rule.title
                ));
            }
            Ok(output)
        }
    }
}

fn format_text(analyses: &[StatementAnalysis], summary: &Summary, opts: &OutputOptions) -> String {
    let mut output = String::new();

    for analysis in analyses {
        let header = format!("Statement #{}", analysis.index + 1);
        if opts.colored {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');
        if opts.verbose {
            output.push_str(&format!("{}\n", analysis.sql));
        }

        let complexity = &analysis.result.complexity;
        output.push_str(&format!(
            "Complexity: {} (score: {})\n",
            level_label(complexity.level(), opts.colored),
            complexity.score()
        ));

        if opts.verbose {
            let structure = &analysis.structure;
            if !structure.cte_names.is_empty() {
                output.push_str(&format!("CTEs: {}\n", join_names(&structure.cte_names)));
            }
            output.push_str(&format!("Tables: {}\n", join_names(&structure.tables)));
            output.push_str(&format_metrics(complexity.metrics()));
        }

        if analysis.result.recommendations.is_empty() {
            output.push_str("No recommendations\n");
        }
        for rec in &analysis.result.recommendations {
            output.push_str(&format!(
                "  {} {}: {}\n",
                severity_label(rec.severity, opts.colored),
                rec.id,
                rec.title
            ));
            output.push_str(&format!("    {}\n", rec.description));
            if let Some(suggestion) = &rec.suggestion {
                let line = format!("    -> {}", suggestion);
                if opts.colored {
                    output.push_str(&line.dimmed().to_string());
                } else {
                    output.push_str(&line);
                }
                output.push('\n');
            }
        }
        output.push('\n');
    }

    let totals = format!(
        "{} statement(s): {} critical, {} warning(s), {} info",
        summary.statements, summary.critical, summary.warning, summary.info
    );
    if opts.colored {
        output.push_str(&totals.bold().to_string());
    } else {
        output.push_str(&totals);
    }
    output.push('\n');
    output
}

fn format_metrics(m: &QueryMetrics) -> String {
    let mut flags = Vec::new();
    for (set, name) in [
        (m.has_distinct, "DISTINCT"),
        (m.has_prewhere, "PREWHERE"),
        (m.has_where, "WHERE"),
        (m.has_group_by, "GROUP BY"),
        (m.has_order_by, "ORDER BY"),
        (m.has_limit, "LIMIT")
    ] {
        if set {
            flags.push(name);
        }
    }
    let columns = if m.is_select_star {
        "*".to_string()
    } else {
        m.column_count.to_string()
    };
    format!(
        "Metrics: tables={} joins={} subquery depth={} aggregations={} columns={}\nClauses: {}\n",
        m.table_count,
        m.join_count,
        m.subquery_depth,
        m.aggregation_count,
        columns,
        if flags.is_empty() {
            "none".to_string()
        } else {
            flags.join(", ")
        }
    )
}

fn join_names(names: &NameSet) -> String {
    let names: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    names.join(", ")
}

fn severity_label(severity: Severity, colored: bool) -> String {
    let label = format!("[{}]", severity);
    if !colored {
        return label;
    }
    match severity {
        Severity::Critical => label.red().bold().to_string(),
        Severity::Warning => label.yellow().to_string(),
        Severity::Info => label.blue().to_string()
    }
}

fn level_label(level: ComplexityLevel, colored: bool) -> String {
    let label = level.to_string();
    if !colored {
        return label;
    }
    match level {
        ComplexityLevel::Low => label.green().to_string(),
        ComplexityLevel::Medium => label.yellow().to_string(),
        ComplexityLevel::High => label.red().to_string()
    }
}
