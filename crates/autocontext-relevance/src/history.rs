//! Recent-transcript analysis.
//!
//! The transcript is line-delimited JSON, newest messages last. Only the
//! trailing lines are scored, and their contribution is dampened by the
//! history weight before being summed per category.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::scorer::{ScoreMap, Scorer};

/// One transcript line. Anything that doesn't fit this shape is skipped.
#[derive(Debug, Deserialize)]
struct TranscriptMessage {
    #[serde(default)]
    content: String,
}

/// Score the last `max_messages` transcript lines, scaled by `history_weight`.
///
/// A missing or unreadable transcript yields an empty map; a malformed line
/// is skipped without affecting the rest.
pub fn analyze_history(
    transcript: &Path,
    scorer: &Scorer,
    max_messages: usize,
    history_weight: f64,
) -> ScoreMap {
    let mut history = ScoreMap::new();

    if transcript.as_os_str().is_empty() || !transcript.exists() {
        return history;
    }

    let raw = match std::fs::read_to_string(transcript) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("error analyzing conversation history: {e}");
            return history;
        }
    };

    let lines: Vec<&str> = raw.lines().collect();
    let recent = &lines[lines.len().saturating_sub(max_messages)..];

    let mut skipped = 0usize;
    for line in recent {
        let message: TranscriptMessage = match serde_json::from_str(line.trim()) {
            Ok(message) => message,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        for (category, score) in scorer.score(&message.content).iter() {
            history.add(category, score * history_weight);
        }
    }

    if skipped > 0 {
        debug!("skipped {skipped} malformed transcript line(s)");
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocontext_core::config::builtin_categories;
    use std::path::PathBuf;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn scorer() -> Scorer {
        Scorer::new(&builtin_categories()).unwrap()
    }

    fn write_transcript(dir: &Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("transcript.jsonl");
        std::fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    #[test]
    fn test_empty_path_yields_nothing() {
        let scores = analyze_history(Path::new(""), &scorer(), 8, 0.3);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let scores = analyze_history(&tmp.path().join("gone.jsonl"), &scorer(), 8, 0.3);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_history_is_weighted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_transcript(tmp.path(), &[r#"{"content":"stripe"}"#]);
        let scores = analyze_history(&path, &scorer(), 8, 0.3);
        assert!(approx(scores.get("stripe").unwrap(), 0.15));
        assert_eq!(scores.get("auth"), Some(0.0));
    }

    #[test]
    fn test_history_accumulates_across_messages() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_transcript(
            tmp.path(),
            &[
                r#"{"content":"stripe checkout"}"#,
                r#"{"content":"the stripe invoice"}"#,
            ],
        );
        let scores = analyze_history(&path, &scorer(), 8, 0.3);
        // (0.5 + 0.5) * 0.3 + (0.5 + 0.5) * 0.3
        assert!(approx(scores.get("stripe").unwrap(), 0.6));
    }

    #[test]
    fn test_only_last_lines_are_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_transcript(
            tmp.path(),
            &[
                r#"{"content":"prisma schema"}"#,
                r#"{"content":"nothing relevant"}"#,
                r#"{"content":"login"}"#,
            ],
        );
        let scores = analyze_history(&path, &scorer(), 2, 0.3);
        assert_eq!(scores.get("database"), Some(0.0));
        assert!(approx(scores.get("auth").unwrap(), 0.9 * 0.5 * 0.3));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_transcript(
            tmp.path(),
            &[
                "not json at all",
                "",
                "[1, 2, 3]",
                r#"{"content": null}"#,
                r#"{"content": [{"type":"text","text":"stripe"}]}"#,
                r#"{"role":"user"}"#,
                r#"{"content":"stripe"}"#,
            ],
        );
        let scores = analyze_history(&path, &scorer(), 8, 0.3);
        assert!(approx(scores.get("stripe").unwrap(), 0.15));
    }

    #[test]
    fn test_zero_max_messages_reads_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_transcript(tmp.path(), &[r#"{"content":"stripe"}"#]);
        assert!(analyze_history(&path, &scorer(), 0, 0.3).is_empty());
    }

    #[test]
    fn test_directory_path_degrades_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(analyze_history(tmp.path(), &scorer(), 8, 0.3).is_empty());
    }
}
