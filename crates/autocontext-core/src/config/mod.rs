mod categories;
mod defaults;


pub use categories::builtin_categories;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::AutoContextError;
use defaults::*;

/// Config file location relative to the project root.
pub const DEFAULT_CONFIG_PATH: &str = ".claude/autocontext.toml";

/// Top-level autocontext configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    /// Threshold multiplier per mode name.
    #[serde(default = "default_mode_multipliers")]
    pub mode_multipliers: HashMap<String, f64>,
    /// Topic categories in declaration order. Order breaks score ties.
    #[serde(default = "builtin_categories", rename = "category")]
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            mode_multipliers: default_mode_multipliers(),
            categories: builtin_categories(),
        }
    }
}

/// A topic bucket: trigger keywords, a weight, and the documents it loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Whole-word, case-insensitive triggers. Lower-cased on load.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Document paths relative to the project root.
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub description: String,
}

fn default_weight() -> f64 {
    1.0
}

/// Tunable pipeline constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Character budget for the injected context.
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
    /// Base threshold before the mode multiplier is applied.
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
    /// Dampening applied to scores from transcript messages.
    #[serde(default = "default_history_weight")]
    pub history_weight: f64,
    /// How many trailing transcript lines are analyzed.
    #[serde(default = "default_max_history_messages")]
    pub max_history_messages: usize,
    /// Prompts shorter than this (trimmed) are ignored.
    #[serde(default = "default_min_prompt_chars")]
    pub min_prompt_chars: usize,
    /// A truncated document is only appended when more than this many
    /// characters of budget remain.
    #[serde(default = "default_min_truncated_chars")]
    pub min_truncated_chars: usize,
    /// Symlink whose target name encodes the mode.
    #[serde(default = "default_mode_link")]
    pub mode_link: String,
    #[serde(default = "default_mode_prefix")]
    pub mode_prefix: String,
    #[serde(default = "default_mode_suffix")]
    pub mode_suffix: String,
    /// Mode used when the symlink cannot be resolved.
    #[serde(default = "default_mode")]
    pub default_mode: String,
    /// Explicit mode. When set, the symlink is not consulted.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional file receiving a copy of the diagnostics.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_context_chars: default_max_context_chars(),
            relevance_threshold: default_relevance_threshold(),
            history_weight: default_history_weight(),
            max_history_messages: default_max_history_messages(),
            min_prompt_chars: default_min_prompt_chars(),
            min_truncated_chars: default_min_truncated_chars(),
            mode_link: default_mode_link(),
            mode_prefix: default_mode_prefix(),
            mode_suffix: default_mode_suffix(),
            default_mode: default_mode(),
            mode: None,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Threshold multiplier for `mode`; 1.0 when the mode is unknown.
    pub fn multiplier_for(&self, mode: &str) -> f64 {
        self.mode_multipliers.get(mode).copied().unwrap_or(1.0)
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Lower-case keywords and drop empty ones.
    fn normalize(&mut self) {
        for category in &mut self.categories {
            category.keywords = category
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
    }

    /// Reject tables that would break the scoring invariants.
    pub fn validate(&self) -> Result<(), AutoContextError> {
        let s = &self.settings;
        if s.max_context_chars == 0 {
            return Err(AutoContextError::Config(
                "settings.max_context_chars must be greater than 0".into(),
            ));
        }
        if !s.relevance_threshold.is_finite() {
            return Err(AutoContextError::Config(
                "settings.relevance_threshold must be finite".into(),
            ));
        }
        if !s.history_weight.is_finite() || s.history_weight < 0.0 {
            return Err(AutoContextError::Config(
                "settings.history_weight must be a non-negative number".into(),
            ));
        }
        for (mode, m) in &self.mode_multipliers {
            if !m.is_finite() || *m < 0.0 {
                return Err(AutoContextError::Config(format!(
                    "mode multiplier for '{mode}' must be a non-negative number"
                )));
            }
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(AutoContextError::Config(
                    "category name must not be empty".into(),
                ));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(AutoContextError::Config(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            if !category.weight.is_finite() || category.weight < 0.0 {
                return Err(AutoContextError::Config(format!(
                    "category '{}' weight must be a non-negative number",
                    category.name
                )));
            }
        }
        Ok(())
    }
}

/// Config path for a project: the explicit path if given, otherwise
/// [`DEFAULT_CONFIG_PATH`] under the project root.
pub fn config_path(project_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => project_dir.join(DEFAULT_CONFIG_PATH),
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &Path) -> Result<Config, AutoContextError> {
    if !path.exists() {
        tracing::debug!(
            "config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        AutoContextError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, AutoContextError> {
    let mut config: Config = toml::from_str(content)
        .map_err(|e| AutoContextError::Config(format!("failed to parse config: {}", e)))?;
    config.normalize();
    config.validate()?;
    Ok(config)
}
