//! # autocontext-relevance
//!
//! Pure stages of the context pipeline: resolve the operating mode, score
//! text against the category table, fold in recent transcript history, and
//! pick the categories that clear the mode-adjusted threshold.

pub mod history;
pub mod mode;
pub mod scorer;
pub mod selection;

pub use history::analyze_history;
pub use mode::detect_mode;
pub use scorer::{ScoreMap, Scorer};
pub use selection::{combine_scores, effective_threshold, select, RankedCategory};
