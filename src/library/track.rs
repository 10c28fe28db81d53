use crate::catalog_client::AudioFeatures;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Flat per-track record that flows through the analysis stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub added_at: NaiveDate,
    pub album_name: String,
    /// Year, year-month or full date, as reported by the catalog.
    pub album_release_date: String,
    pub artist_names: String,
    /// Id of the first credited artist.
    pub artist_id: String,
    pub track_name: String,
    pub track_popularity: u32,
    /// Niche tags after enrichment, macro-genre labels after normalization.
    #[serde(default)]
    pub genres: BTreeSet<String>,
    #[serde(flatten)]
    pub features: TrackFeatures,
}

/// The twelve audio metrics copied from the catalog's audio analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackFeatures {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub valence: f64,
    pub key: i32,
    pub mode: i32,
    pub time_signature: i32,
}

impl From<&AudioFeatures> for TrackFeatures {
    fn from(features: &AudioFeatures) -> Self {
        Self {
            acousticness: features.acousticness,
            danceability: features.danceability,
            energy: features.energy,
            instrumentalness: features.instrumentalness,
            liveness: features.liveness,
            loudness: features.loudness,
            speechiness: features.speechiness,
            tempo: features.tempo,
            valence: features.valence,
            key: features.key,
            mode: features.mode,
            time_signature: features.time_signature,
        }
    }
}
