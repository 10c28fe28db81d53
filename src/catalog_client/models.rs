//! Wire shapes exchanged with the music catalog.
//!
//! These mirror the catalog's JSON closely so the raw saved-item collection
//! can be cached verbatim and re-read by later stages.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing. `next` is `None` on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// An entry of the user's saved-track library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    /// RFC 3339 timestamp of when the user saved the track.
    pub added_at: String,
    /// Absent for items the catalog can no longer resolve.
    pub track: Option<RawTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    pub id: Option<String>,
    pub name: String,
    pub popularity: u32,
    pub album: RawAlbum,
    pub artists: Vec<RawArtistRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAlbum {
    pub name: String,
    /// Precision varies: "2004", "2004-03" or "2004-03-15".
    pub release_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArtistRef {
    pub id: Option<String>,
    pub name: String,
}

/// Full artist record returned by the batched artist lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub id: String,
    pub name: String,
    /// Niche genre tags, e.g. "dutch hip hop".
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Audio analysis metrics for one track. Missing metrics read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    pub id: String,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}
