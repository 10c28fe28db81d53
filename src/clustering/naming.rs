use super::features::{DateRange, FeatureVector, AGE_DIMENSION, GENRE_DIMENSION};
use crate::genres::MacroGenre;
use chrono::Datelike;

/// Derive a display name such as `"1997's Rock"` from a centroid.
///
/// The year comes from inverting the age normalization against the library's
/// date range; the genre is the score-table entry closest to the centroid's
/// genre coordinate.
pub fn cluster_name(centroid: &FeatureVector, date_range: &DateRange) -> String {
    let year = date_range
        .representative_date(centroid[AGE_DIMENSION])
        .year();
    let genre = MacroGenre::closest_to_score(centroid[GENRE_DIMENSION]);
    format!("{}'s {}", year, genre.label())
}
