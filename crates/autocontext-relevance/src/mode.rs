//! Operating-mode detection.
//!
//! The active mode is encoded in the name of the file a well-known symlink
//! points at, e.g. `.claude/mcp-config.json -> mcp-config-enterprise.json`.
//! An explicit `settings.mode` takes precedence over the link.

use autocontext_core::config::Settings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve the operating mode for `project_dir`.
///
/// Falls back to `settings.default_mode` whenever the link is missing, is
/// not a symlink, or its target name yields an empty mode.
pub fn detect_mode(project_dir: &Path, settings: &Settings) -> String {
    if let Some(mode) = settings.mode.as_deref().filter(|m| !m.is_empty()) {
        return mode.to_string();
    }

    let link = project_dir.join(&settings.mode_link);
    match mode_from_link(&link, &settings.mode_prefix, &settings.mode_suffix) {
        Some(mode) => mode,
        None => {
            debug!(
                "no mode link at {}, using '{}'",
                link.display(),
                settings.default_mode
            );
            settings.default_mode.clone()
        }
    }
}

fn mode_from_link(link: &Path, prefix: &str, suffix: &str) -> Option<String> {
    let meta = std::fs::symlink_metadata(link).ok()?;
    if !meta.file_type().is_symlink() {
        return None;
    }

    let target = resolve_target(link)?;
    let name = target.file_name()?.to_string_lossy();
    let name = name.strip_prefix(prefix).unwrap_or(&name);
    let name = name.strip_suffix(suffix).unwrap_or(name);
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Follow the link to its final target. A dangling link still names its
/// target, so fall back to the raw link contents.
fn resolve_target(link: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(link)
        .ok()
        .or_else(|| std::fs::read_link(link).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_missing_link_uses_default() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(detect_mode(tmp.path(), &settings()), "light");
    }

    #[test]
    fn test_regular_file_uses_default() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".claude")).unwrap();
        std::fs::write(tmp.path().join(".claude/mcp-config.json"), "{}").unwrap();
        assert_eq!(detect_mode(tmp.path(), &settings()), "light");
    }

    #[test]
    fn test_explicit_mode_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = settings();
        s.mode = Some("testing".into());
        assert_eq!(detect_mode(tmp.path(), &s), "testing");
    }

    #[test]
    fn test_empty_explicit_mode_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = settings();
        s.mode = Some(String::new());
        assert_eq!(detect_mode(tmp.path(), &s), "light");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_target_names_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".claude");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("mcp-config-enterprise.json"), "{}").unwrap();
        std::os::unix::fs::symlink("mcp-config-enterprise.json", dir.join("mcp-config.json"))
            .unwrap();
        assert_eq!(detect_mode(tmp.path(), &settings()), "enterprise");
    }

    #[cfg(unix)]
    #[test]
    fn test_chained_symlink_resolves_to_final_target() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".claude");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("mcp-config-shopify.json"), "{}").unwrap();
        std::os::unix::fs::symlink("mcp-config-shopify.json", dir.join("current.json")).unwrap();
        std::os::unix::fs::symlink("current.json", dir.join("mcp-config.json")).unwrap();
        assert_eq!(detect_mode(tmp.path(), &settings()), "shopify");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_still_names_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".claude");
        std::fs::create_dir_all(&dir).unwrap();
        std::os::unix::fs::symlink("mcp-config-testing.json", dir.join("mcp-config.json"))
            .unwrap();
        assert_eq!(detect_mode(tmp.path(), &settings()), "testing");
    }

    #[cfg(unix)]
    #[test]
    fn test_target_without_prefix_keeps_name() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".claude");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("custom.json"), "{}").unwrap();
        std::os::unix::fs::symlink("custom.json", dir.join("mcp-config.json")).unwrap();
        assert_eq!(detect_mode(tmp.path(), &settings()), "custom");
    }
}
