//! Hook request and response payloads.
//!
//! The caller writes one JSON object to stdin and reads one JSON object from
//! stdout. The response is either `{}` or a `hookSpecificOutput` block carrying
//! the injected context.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AutoContextError;

/// Event name reported back to the caller.
pub const HOOK_EVENT_NAME: &str = "UserPromptSubmit";

/// Request read from stdin. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// The prompt the user just submitted.
    #[serde(default)]
    pub prompt: String,
    /// Path to the line-delimited conversation transcript. May be empty.
    #[serde(default)]
    pub transcript_path: Option<String>,
    /// Working directory of the session, used when no project root is set.
    #[serde(default)]
    pub cwd: Option<String>,
}

impl HookInput {
    /// Parse a request payload.
    pub fn parse(raw: &str) -> Result<Self, AutoContextError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(AutoContextError::Input(
                "hook payload must be a JSON object".into(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Transcript path, with an empty string treated as absent.
    pub fn transcript(&self) -> Option<&str> {
        self.transcript_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Resolve the project root: the override (command line or
    /// `CLAUDE_PROJECT_DIR`), then the request's `cwd`, then `.`.
    pub fn project_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        match override_dir.filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(self.cwd.as_deref().unwrap_or(".")),
        }
    }
}

/// Response written to stdout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

/// Payload carrying injected context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

impl HookOutput {
    /// The empty response, `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A response injecting `context` for the prompt-submit event.
    pub fn with_context(context: String) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: HOOK_EVENT_NAME.to_string(),
                additional_context: context,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hook_specific_output.is_none()
    }

    /// Serialize for stdout. Falls back to `{}` so the caller always gets
    /// parseable JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
