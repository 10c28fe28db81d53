//! Descriptive summaries of an analyzed library.

mod stats;

pub use stats::LibraryStatsAnalyzer;

use crate::library::Track;
use serde::{Deserialize, Serialize};

/// Human-readable summary cached alongside the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisText {
    pub lines: Vec<String>,
}

/// Produces analysis text from enriched, genre-normalized tracks.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait AnalysisTextGenerator: Send + Sync {
    fn describe(&self, tracks: &[Track]) -> AnalysisText;
}
