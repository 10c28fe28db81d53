//! Builders for synthetic saved-track libraries

use super::constants::*;
use genrify::catalog_client::{
    ArtistProfile, AudioFeatures, RawAlbum, RawArtistRef, RawTrack, SavedItem,
};

/// Catalog-side data for one synthetic library.
pub struct SyntheticLibrary {
    pub saved_items: Vec<SavedItem>,
    pub artists: Vec<ArtistProfile>,
    pub audio_features: Vec<AudioFeatures>,
}

impl SyntheticLibrary {
    pub fn track_ids(&self) -> Vec<String> {
        self.saved_items
            .iter()
            .filter_map(|item| item.track.as_ref())
            .filter_map(|track| track.id.clone())
            .collect()
    }
}

/// `count` tracks with release dates spread evenly between
/// [`FIRST_RELEASE_YEAR`] and [`LAST_RELEASE_YEAR`], artist genres cycling
/// through [`ROTATING_GENRE_TAGS`] and popularity spread over 0..=100.
pub fn synthetic_library(count: usize) -> SyntheticLibrary {
    let year_span = (LAST_RELEASE_YEAR - FIRST_RELEASE_YEAR) as usize;
    let last_index = count.saturating_sub(1).max(1);

    let mut saved_items = Vec::with_capacity(count);
    let mut artists = Vec::with_capacity(count);
    let mut audio_features = Vec::with_capacity(count);

    for i in 0..count {
        let track_id = format!("track-{:03}", i);
        let artist_id = format!("artist-{:03}", i);
        let year = FIRST_RELEASE_YEAR + (i * year_span / last_index) as i32;
        let month = (i % 12) + 1;

        saved_items.push(SavedItem {
            added_at: format!("2024-{:02}-15T12:00:00Z", month),
            track: Some(RawTrack {
                id: Some(track_id.clone()),
                name: format!("Synthetic Song {}", i),
                popularity: (i * 100 / last_index) as u32,
                album: RawAlbum {
                    name: format!("Synthetic Album {}", i),
                    release_date: format!("{}-{:02}-01", year, month),
                },
                artists: vec![RawArtistRef {
                    id: Some(artist_id.clone()),
                    name: format!("Synthetic Artist {}", i),
                }],
            }),
        });

        artists.push(ArtistProfile {
            id: artist_id,
            name: format!("Synthetic Artist {}", i),
            genres: vec![ROTATING_GENRE_TAGS[i % ROTATING_GENRE_TAGS.len()].to_string()],
        });

        let shade = (i % 10) as f64 / 10.0;
        audio_features.push(AudioFeatures {
            id: track_id,
            acousticness: 1.0 - shade,
            danceability: shade,
            energy: 0.5 + shade / 2.0,
            valence: shade,
            tempo: 90.0 + i as f64,
            loudness: -8.0,
            key: (i % 12) as i32,
            mode: (i % 2) as i32,
            time_signature: 4,
            ..Default::default()
        });
    }

    SyntheticLibrary {
        saved_items,
        artists,
        audio_features,
    }
}
