//! Default value functions used by serde for config deserialization.

use std::collections::HashMap;

pub fn default_max_context_chars() -> usize {
    12_000
}

pub fn default_relevance_threshold() -> f64 {
    0.5
}

pub fn default_history_weight() -> f64 {
    0.3
}

pub fn default_max_history_messages() -> usize {
    8
}

pub fn default_min_prompt_chars() -> usize {
    10
}

pub fn default_min_truncated_chars() -> usize {
    500
}

pub fn default_mode_link() -> String {
    ".claude/mcp-config.json".to_string()
}

pub fn default_mode_prefix() -> String {
    "mcp-config-".to_string()
}

pub fn default_mode_suffix() -> String {
    ".json".to_string()
}

pub fn default_mode() -> String {
    "light".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

/// Threshold multipliers per mode. Unknown modes fall back to 1.0.
pub fn default_mode_multipliers() -> HashMap<String, f64> {
    [
        ("light", 1.5),
        ("enterprise", 0.7),
        ("shopify", 0.8),
        ("testing", 0.6),
    ]
    .into_iter()
    .map(|(mode, m)| (mode.to_string(), m))
    .collect()
}
