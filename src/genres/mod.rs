//! Macro-genre taxonomy, genre scoring and tag normalization.

mod macro_genre;
mod normalizer;
mod taxonomy;

pub use macro_genre::{
    dominant_genre, genre_score, MacroGenre, PRIORITY_ORDER, SCORE_TABLE, UNMAPPED_GENRE_SCORE,
};
pub use normalizer::{normalize_genres, resolve_macro_genres};
pub use taxonomy::{GenreTaxonomy, StaticGenreTaxonomy};

#[cfg(any(test, feature = "mock"))]
pub use taxonomy::MockGenreTaxonomy;
