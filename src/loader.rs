//! Reference-document loading under a character budget.
//!
//! Documents are appended in category order, each behind a two-line header.
//! The running total counts every character that will be emitted, separators
//! included, so the result never exceeds the budget except by the length of
//! the truncation marker.

use autocontext_core::config::Config;
use std::path::Path;
use tracing::{debug, info, warn};

/// Placed between loaded documents.
pub const SEPARATOR: &str = "\n\n---\n\n";

/// Appended to a document cut short by the budget.
pub const TRUNCATION_MARKER: &str = "\n\n[...truncated for token efficiency]";

/// Concatenate the documents of `categories` (already ranked) found under
/// `project_dir`. Returns an empty string when nothing could be loaded.
pub fn load_context(categories: &[String], config: &Config, project_dir: &Path) -> String {
    let budget = config.settings.max_context_chars;
    let min_truncated = config.settings.min_truncated_chars;
    let separator_len = SEPARATOR.chars().count();

    let mut parts: Vec<String> = Vec::new();
    let mut total = 0usize;

    'categories: for name in categories {
        let Some(category) = config.category(name) else {
            continue;
        };

        for file in &category.files {
            let path = project_dir.join(file);
            if !path.exists() {
                info!("context file not found: {file}");
                continue;
            }

            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("error loading {file}: {e}");
                    continue;
                }
            };

            let block = format!(
                "# Auto-loaded Context: {}\n# Source: {}\n\n{}",
                category.description, file, content
            );
            let block_len = block.chars().count();
            let joint = if parts.is_empty() { 0 } else { separator_len };

            if total + joint + block_len > budget {
                let remaining = budget.saturating_sub(total + joint);
                if remaining > min_truncated {
                    let mut truncated: String = block.chars().take(remaining).collect();
                    truncated.push_str(TRUNCATION_MARKER);
                    parts.push(truncated);
                    info!("loaded context: {file} (truncated to {remaining} chars)");
                } else {
                    debug!("budget exhausted, dropping {file} ({remaining} chars left)");
                }
                break 'categories;
            }

            total += joint + block_len;
            parts.push(block);
            info!("loaded context: {file} ({} chars)", content.chars().count());
        }
    }

    parts.join(SEPARATOR)
}
