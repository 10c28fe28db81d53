use super::track::{Track, TrackFeatures};
use crate::catalog_client::SavedItem;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use thiserror::Error;

/// A saved item that cannot be turned into a [`Track`].
#[derive(Debug, Error, PartialEq)]
pub enum SimplifyError {
    #[error("Saved item {index} has no track")]
    MissingTrack { index: usize },

    #[error("Track '{track_name}' has no id")]
    MissingTrackId { track_name: String },

    #[error("Track {track_id} has no artists")]
    NoArtists { track_id: String },

    #[error("Primary artist of track {track_id} has no id")]
    MissingArtistId { track_id: String },

    #[error("Invalid added_at timestamp '{value}' on track {track_id}")]
    InvalidAddedAt { track_id: String, value: String },
}

/// Project raw saved items into flat [`Track`] records, preserving order.
///
/// Genres and audio features are left empty for the enricher to fill in.
pub fn simplify_saved_items(items: &[SavedItem]) -> Result<Vec<Track>, SimplifyError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| simplify_item(index, item))
        .collect()
}

fn simplify_item(index: usize, item: &SavedItem) -> Result<Track, SimplifyError> {
    let track = item
        .track
        .as_ref()
        .ok_or(SimplifyError::MissingTrack { index })?;

    let id = track
        .id
        .clone()
        .ok_or_else(|| SimplifyError::MissingTrackId {
            track_name: track.name.clone(),
        })?;

    let primary_artist = track
        .artists
        .first()
        .ok_or_else(|| SimplifyError::NoArtists {
            track_id: id.clone(),
        })?;
    let artist_id = primary_artist
        .id
        .clone()
        .ok_or_else(|| SimplifyError::MissingArtistId {
            track_id: id.clone(),
        })?;

    let added_at = parse_added_at(&item.added_at).ok_or_else(|| SimplifyError::InvalidAddedAt {
        track_id: id.clone(),
        value: item.added_at.clone(),
    })?;

    let artist_names = track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Track {
        id,
        added_at,
        album_name: track.album.name.clone(),
        album_release_date: track.album.release_date.clone(),
        artist_names,
        artist_id,
        track_name: track.name.clone(),
        track_popularity: track.popularity,
        genres: BTreeSet::new(),
        features: TrackFeatures::default(),
    })
}

/// The calendar date is the first ten characters of the RFC 3339 timestamp.
fn parse_added_at(value: &str) -> Option<NaiveDate> {
    let date = value.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
