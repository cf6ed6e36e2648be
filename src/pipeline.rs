//! Prompt processing pipeline: guard, score, filter, load, emit.

use autocontext_core::config::Config;
use autocontext_core::error::AutoContextError;
use autocontext_core::hook::{HookInput, HookOutput};
use autocontext_relevance::{
    analyze_history, combine_scores, detect_mode, effective_threshold, select, RankedCategory,
    ScoreMap, Scorer,
};
use std::path::Path;
use tracing::info;

use crate::loader;


/// Everything decided before documents are loaded.
#[derive(Debug)]
pub struct Evaluation {
    pub mode: String,
    pub threshold: f64,
    /// Prompt and history scores combined.
    pub scores: ScoreMap,
    /// Categories at or above the threshold, highest first.
    pub selected: Vec<RankedCategory>,
}

/// Score `prompt` plus recent history and pick the relevant categories.
pub fn evaluate(
    config: &Config,
    scorer: &Scorer,
    prompt: &str,
    transcript: Option<&Path>,
    project_dir: &Path,
) -> Evaluation {
    let mode = detect_mode(project_dir, &config.settings);
    let threshold = effective_threshold(config, &mode);

    let prompt_scores = scorer.score(prompt);
    let history_scores = match transcript {
        Some(path) => analyze_history(
            path,
            scorer,
            config.settings.max_history_messages,
            config.settings.history_weight,
        ),
        None => ScoreMap::new(),
    };
    let scores = combine_scores(&prompt_scores, &history_scores);
    let selected = select(&scores, threshold);

    Evaluation {
        mode,
        threshold,
        scores,
        selected,
    }
}

/// Whether the trimmed prompt is long enough to be worth scoring.
pub fn is_meaningful_prompt(prompt: &str, min_chars: usize) -> bool {
    let trimmed = prompt.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_chars
}

/// Run one hook invocation. Every "nothing to inject" outcome is `{}`.
pub fn run(
    config: &Config,
    input: &HookInput,
    project_dir: &Path,
) -> Result<HookOutput, AutoContextError> {
    // --- 1. TRIVIAL PROMPT GUARD ---
    if !is_meaningful_prompt(&input.prompt, config.settings.min_prompt_chars) {
        return Ok(HookOutput::empty());
    }

    // --- 2. SCORE ---
    let scorer = Scorer::new(&config.categories)?;
    let transcript = input.transcript().map(Path::new);
    let eval = evaluate(config, &scorer, &input.prompt, transcript, project_dir);
    info!(
        "analyzing prompt in {} mode (threshold: {:.2})",
        eval.mode, eval.threshold
    );

    // --- 3. FILTER ---
    if eval.selected.is_empty() {
        info!("no relevant context detected");
        return Ok(HookOutput::empty());
    }
    let summary: Vec<String> = eval
        .selected
        .iter()
        .map(|c| format!("{}({:.2})", c.name, c.score))
        .collect();
    info!("relevant categories: {}", summary.join(", "));

    // --- 4. LOAD ---
    let names: Vec<String> = eval.selected.into_iter().map(|c| c.name).collect();
    let context = loader::load_context(&names, config, project_dir);
    if context.is_empty() {
        info!("no context files could be loaded");
        return Ok(HookOutput::empty());
    }

    // --- 5. EMIT ---
    info!("injecting {} characters of context", context.chars().count());
    Ok(HookOutput::with_context(context))
}
