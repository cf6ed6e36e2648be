//! Score combination and threshold filtering.

use autocontext_core::config::Config;

use crate::scorer::ScoreMap;

/// A category that cleared the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCategory {
    pub name: String,
    pub score: f64,
}

/// Sum prompt and history scores by category. Missing entries count as 0;
/// the result holds the union of both key sets, prompt order first.
pub fn combine_scores(prompt: &ScoreMap, history: &ScoreMap) -> ScoreMap {
    let mut combined = ScoreMap::new();
    for (name, score) in prompt.iter().chain(history.iter()) {
        combined.add(name, score);
    }
    combined
}

/// Base threshold scaled by the mode's multiplier.
pub fn effective_threshold(config: &Config, mode: &str) -> f64 {
    config.settings.relevance_threshold * config.multiplier_for(mode)
}

/// Categories scoring at least `threshold`, highest first.
///
/// The sort is stable, so equal scores keep their declaration order.
pub fn select(scores: &ScoreMap, threshold: f64) -> Vec<RankedCategory> {
    let mut ranked: Vec<RankedCategory> = scores
        .iter()
        .filter(|(_, score)| *score >= threshold)
        .map(|(name, score)| RankedCategory {
            name: name.to_string(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> ScoreMap {
        let mut m = ScoreMap::new();
        for (name, score) in entries {
            m.add(name, *score);
        }
        m
    }

    fn names(ranked: &[RankedCategory]) -> Vec<&str> {
        ranked.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_combine_sums_matching_keys() {
        let combined = combine_scores(&map(&[("a", 1.0), ("b", 0.0)]), &map(&[("a", 0.3)]));
        assert_eq!(combined.get("a"), Some(1.3));
        assert_eq!(combined.get("b"), Some(0.0));
    }

    #[test]
    fn test_combine_is_union() {
        let combined = combine_scores(&map(&[("a", 0.5)]), &map(&[("b", 0.2)]));
        assert_eq!(combined.get("a"), Some(0.5));
        assert_eq!(combined.get("b"), Some(0.2));
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_combine_with_empty_history() {
        let prompt = map(&[("a", 0.5), ("b", 0.0)]);
        assert_eq!(combine_scores(&prompt, &ScoreMap::new()), prompt);
    }

    #[test]
    fn test_effective_threshold_per_mode() {
        let config = Config::default();
        assert!((effective_threshold(&config, "light") - 0.75).abs() < 1e-9);
        assert!((effective_threshold(&config, "enterprise") - 0.35).abs() < 1e-9);
        assert!((effective_threshold(&config, "testing") - 0.3).abs() < 1e-9);
        assert_eq!(effective_threshold(&config, "mystery"), 0.5);
    }

    #[test]
    fn test_select_filters_and_orders() {
        let scores = map(&[("a", 0.4), ("b", 1.2), ("c", 0.75), ("d", 2.0)]);
        let ranked = select(&scores, 0.75);
        assert_eq!(names(&ranked), vec!["d", "b", "c"]);
    }

    #[test]
    fn test_select_threshold_is_inclusive() {
        let ranked = select(&map(&[("a", 0.5)]), 0.5);
        assert_eq!(names(&ranked), vec!["a"]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let scores = map(&[("z", 1.0), ("m", 1.5), ("a", 1.0)]);
        assert_eq!(names(&select(&scores, 0.5)), vec!["m", "z", "a"]);
    }

    #[test]
    fn test_select_nothing_when_all_zero() {
        assert!(select(&map(&[("a", 0.0), ("b", 0.0)]), 0.5).is_empty());
    }
}
