//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments (`--disable`)
//! 2. Environment variables
//! 3. `.sql-advisor.toml` in current directory
//! 4. `~/.config/sql-query-advisor/config.toml`
//! 5. Default values
//!
//! Files are merged, not replaced: disabled lists accumulate and a later
//! severity override for the same rule wins.
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! disabled = ["prewhere-opportunity", "final-keyword"]
//!
//! [rules.severity]
//! missing-limit = "critical"
//! select-star = "warning"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_ADVISOR_DISABLED_RULES` | Comma-separated rule ids to disable |

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppResult, config_error, file_read_error};

/// Environment variable holding extra disabled rule ids
pub const DISABLED_RULES_ENV: &str = "SQL_ADVISOR_DISABLED_RULES";

/// Per-directory config file name
pub const LOCAL_CONFIG_FILE: &str = ".sql-advisor.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Severity overrides (rule_id -> severity)
    #[serde(default)]
    pub severity: HashMap<String, String>
}

impl RulesConfig {
    /// Layer `other` on top of `self`.
    ///
    /// Severity keys are stored lower-cased. Keys of `other` that differ
    /// only in case are applied in sorted order, so the last one wins.
    pub fn merge(&mut self, other: RulesConfig) {
        for id in other.disabled {
            if !self.disabled.iter().any(|d| d.eq_ignore_ascii_case(&id)) {
                self.disabled.push(id);
            }
        }
        let mut overrides: Vec<(String, String)> = other.severity.into_iter().collect();
        overrides.sort();
        for (id, severity) in overrides {
            self.severity.insert(id.to_ascii_lowercase(), severity);
        }
    }

    /// Disable rules given as a comma-separated list
    pub fn disable_list(&mut self, list: &str) {
        let ids = list
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
        self.merge(RulesConfig {
            disabled: ids,
            ..Default::default()
        });
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-advisor.toml)
    /// 3. Config file in home directory
    ///    (~/.config/sql-query-advisor/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut files = Vec::with_capacity(2);
        if let Some(home) = env::var_os("HOME") {
            files.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("sql-query-advisor")
                    .join("config.toml")
            );
        }
        files.push(PathBuf::from(LOCAL_CONFIG_FILE));
        let env_disabled = env::var(DISABLED_RULES_ENV).ok();
        Self::load_from(&files, env_disabled.as_deref())
    }

    /// Merge the given files in order, skipping missing ones, then apply
    /// the environment's disabled list
    pub fn load_from(files: &[PathBuf], env_disabled: Option<&str>) -> AppResult<Self> {
        let mut config = Self::default();
        for path in files.iter().filter(|p| p.exists()) {
            let layer = Self::from_file(path)?;
            config.rules.merge(layer.rules);
        }
        if let Some(list) = env_disabled {
            config.rules.disable_list(list);
        }
        Ok(config)
    }

    /// Read one TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| file_read_error(&shown, e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| config_error(format!("Invalid config file '{}': {}", shown, e)))?;
        debug!(path = %shown, disabled = config.rules.disabled.len(), "loaded config file");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_deduplicates_case_insensitively() {
        let mut base = RulesConfig {
            disabled: vec!["select-star".into()],
            ..Default::default()
        };
        base.disable_list("SELECT-STAR, final-keyword,,");
        assert_eq!(base.disabled, vec!["select-star", "final-keyword"]);
    }

    #[test]
    fn test_later_severity_wins() {
        let mut base = RulesConfig::default();
        base.severity.insert("missing-limit".into(), "info".into());
        let mut top = RulesConfig::default();
        top.severity.insert("missing-limit".into(), "critical".into());
        base.merge(top);
        assert_eq!(base.severity["missing-limit"], "critical");
    }

    #[test]
    fn test_severity_keys_fold_case() {
        let mut base = RulesConfig::default();
        base.severity.insert("missing-limit".into(), "info".into());
        let mut top = RulesConfig::default();
        top.severity.insert("MISSING-LIMIT".into(), "critical".into());
        base.merge(top);
        assert_eq!(base.severity.len(), 1);
        assert_eq!(base.severity["missing-limit"], "critical");
    }

    #[test]
    fn test_case_variants_in_one_layer_resolve_the_same_way() {
        for _ in 0..16 {
            let mut layer = RulesConfig::default();
            layer.severity.insert("Select-Star".into(), "info".into());
            layer.severity.insert("select-star".into(), "warning".into());
            let mut merged = RulesConfig::default();
            merged.merge(layer);
            assert_eq!(merged.severity.len(), 1);
            assert_eq!(merged.severity["select-star"], "warning");
        }
    }
}
