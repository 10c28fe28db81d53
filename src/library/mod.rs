//! Saved-track retrieval and per-track enrichment.

mod enricher;
mod fetcher;
mod simplifier;
mod track;

pub use enricher::enrich_tracks;
pub use fetcher::{fetch_saved_tracks, FetchOutcome};
pub use simplifier::{simplify_saved_items, SimplifyError};
pub use track::{Track, TrackFeatures};
