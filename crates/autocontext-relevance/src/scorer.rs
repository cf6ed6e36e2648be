//! Keyword relevance scoring.
//!
//! Each keyword hit contributes `weight * min(1.0, 0.3 + 0.2 * count)` to its
//! category, so one occurrence is worth half the weight and anything past the
//! fourth occurrence adds nothing more.

use autocontext_core::config::Category;
use autocontext_core::error::AutoContextError;
use regex::Regex;

/// Per-category scores in category declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    entries: Vec<(String, f64)>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, score)| *score)
    }

    /// Add `amount` to `name`, inserting it at the end if absent.
    pub fn add(&mut self, name: &str, amount: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, score)) => *score += amount,
            None => self.entries.push((name.to_string(), amount)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Contribution of a single keyword seen `count` times.
pub fn keyword_contribution(weight: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    weight * (0.3 + 0.2 * count as f64).min(1.0)
}

struct CategoryMatcher {
    name: String,
    weight: f64,
    patterns: Vec<Regex>,
}

/// Compiled keyword matchers for the whole category table.
pub struct Scorer {
    matchers: Vec<CategoryMatcher>,
}

impl Scorer {
    /// Compile one whole-word pattern per keyword.
    pub fn new(categories: &[Category]) -> Result<Self, AutoContextError> {
        let mut matchers = Vec::with_capacity(categories.len());
        for category in categories {
            let patterns = category
                .keywords
                .iter()
                .map(|kw| {
                    let pattern = format!(r"\b{}\b", regex::escape(&kw.to_lowercase()));
                    Regex::new(&pattern).map_err(|e| {
                        AutoContextError::Pattern(format!(
                            "keyword '{kw}' in category '{}': {e}",
                            category.name
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            matchers.push(CategoryMatcher {
                name: category.name.clone(),
                weight: category.weight,
                patterns,
            });
        }
        Ok(Self { matchers })
    }

    /// Score `text` against every category. Categories without a hit are
    /// present with a score of exactly 0.
    pub fn score(&self, text: &str) -> ScoreMap {
        let text_lower = text.to_lowercase();
        let mut scores = ScoreMap::new();
        for matcher in &self.matchers {
            let score = matcher.patterns.iter().fold(0.0, |acc, re| {
                let count = re.find_iter(&text_lower).count();
                acc + keyword_contribution(matcher.weight, count)
            });
            scores.add(&matcher.name, score);
        }
        scores
    }
}
