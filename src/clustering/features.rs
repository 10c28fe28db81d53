use super::ClusteringError;
use crate::genres::dominant_genre;
use crate::library::Track;
use chrono::{NaiveDate, TimeDelta, Utc};
use tracing::warn;

pub const FEATURE_DIMENSIONS: usize = 7;

/// Centroid dimension holding the normalized release date.
pub const AGE_DIMENSION: usize = 0;
/// Centroid dimension holding the genre score.
pub const GENRE_DIMENSION: usize = 1;

pub const AGE_WEIGHT: f64 = 5.0;
pub const GENRE_WEIGHT: f64 = 1.0;
pub const POPULARITY_WEIGHT: f64 = 2.5;
pub const VALENCE_WEIGHT: f64 = 2.5;
pub const DANCEABILITY_WEIGHT: f64 = 2.5;
pub const ENERGY_WEIGHT: f64 = 2.5;
pub const ACOUSTICNESS_WEIGHT: f64 = 2.5;

/// `[age, genre, popularity, valence, danceability, energy, acousticness]`,
/// each already multiplied by its weight.
pub type FeatureVector = [f64; FEATURE_DIMENSIONS];

/// Span of release dates across one library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateRange {
    pub fn from_dates(dates: &[NaiveDate]) -> Option<Self> {
        let min = *dates.iter().min()?;
        let max = *dates.iter().max()?;
        Some(Self { min, max })
    }

    fn span_seconds(&self) -> f64 {
        (self.max - self.min).num_seconds() as f64
    }

    /// Position of `date` in the range scaled to `[0, AGE_WEIGHT]`.
    ///
    /// A range with a single distinct date maps everything to 0.
    pub fn normalize(&self, date: NaiveDate) -> f64 {
        let span = self.span_seconds();
        if span <= 0.0 {
            return 0.0;
        }
        (date - self.min).num_seconds() as f64 / span * AGE_WEIGHT
    }

    /// Inverse of [`DateRange::normalize`].
    pub fn representative_date(&self, normalized_age: f64) -> NaiveDate {
        let span = self.span_seconds();
        if span <= 0.0 || !normalized_age.is_finite() {
            return self.min;
        }
        let offset = (normalized_age / AGE_WEIGHT * span).round() as i64;
        self.min
            .checked_add_signed(TimeDelta::seconds(offset))
            .unwrap_or(self.min)
    }
}

/// Parse a release date of year, year-month or full-date precision.
///
/// The precision is picked from the string length. Unparseable values fall
/// back to today.
pub fn parse_release_date(value: &str) -> NaiveDate {
    let parsed = match value.len() {
        10 => NaiveDate::parse_from_str(value, "%Y-%m-%d"),
        7 => NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d"),
        _ => NaiveDate::parse_from_str(&format!("{}-01-01", value), "%Y-%m-%d"),
    };

    parsed.unwrap_or_else(|_| {
        warn!("Unparseable release date '{}', using today", value);
        Utc::now().date_naive()
    })
}

/// Weighted feature rows, in track order, plus the date range used for ages.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub rows: Vec<FeatureVector>,
    pub date_range: DateRange,
}

/// Build the 7-dimensional feature row of every track.
pub fn vectorize(tracks: &[Track]) -> Result<FeatureMatrix, ClusteringError> {
    let dates: Vec<NaiveDate> = tracks
        .iter()
        .map(|t| parse_release_date(&t.album_release_date))
        .collect();
    let date_range = DateRange::from_dates(&dates).ok_or(ClusteringError::EmptyLibrary)?;

    let mut rows = Vec::with_capacity(tracks.len());
    for (track, date) in tracks.iter().zip(&dates) {
        let row: FeatureVector = [
            date_range.normalize(*date),
            dominant_genre(&track.genres).score() * GENRE_WEIGHT,
            track.track_popularity as f64 / 100.0 * POPULARITY_WEIGHT,
            track.features.valence * VALENCE_WEIGHT,
            track.features.danceability * DANCEABILITY_WEIGHT,
            track.features.energy * ENERGY_WEIGHT,
            track.features.acousticness * ACOUSTICNESS_WEIGHT,
        ];

        if let Some(dimension) = row.iter().position(|v| !v.is_finite()) {
            return Err(ClusteringError::NonFiniteFeature {
                track_id: track.id.clone(),
                dimension,
            });
        }
        rows.push(row);
    }

    Ok(FeatureMatrix { rows, date_range })
}
