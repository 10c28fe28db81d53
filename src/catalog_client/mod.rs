//! Interface to the external music catalog.
//!
//! The concrete HTTP client and its OAuth handling live outside this crate.
//! Everything here is the capability the pipeline needs, plus the page and
//! batch ceilings the catalog enforces.

mod models;

pub use models::{
    ArtistProfile, AudioFeatures, Page, PlaylistSummary, RawAlbum, RawArtistRef, RawTrack,
    SavedItem,
};

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Page size for the saved-track listing.
pub const SAVED_TRACKS_PAGE_SIZE: usize = 50;

/// Maximum ids per artist or audio-feature lookup.
pub const LOOKUP_BATCH_SIZE: usize = 50;

/// Maximum tracks per add-to-playlist call.
pub const PLAYLIST_ADD_BATCH_SIZE: usize = 50;

/// Page size for the user's playlist listing.
pub const PLAYLIST_PAGE_SIZE: usize = 50;

/// Iteration granularity for playlist removal.
pub const UNFOLLOW_BATCH_SIZE: usize = 100;

/// Errors returned by the external catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Access token rejected")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Authenticated access to one user's catalog account.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MusicCatalogClient: Send + Sync {
    /// One page of the current user's saved tracks.
    async fn saved_tracks(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Page<SavedItem>, CatalogError>;

    /// Look up at most [`LOOKUP_BATCH_SIZE`] artists.
    async fn artists(&self, artist_ids: &[String]) -> Result<Vec<ArtistProfile>, CatalogError>;

    /// Look up audio features for at most [`LOOKUP_BATCH_SIZE`] tracks.
    ///
    /// Tracks the catalog has no analysis for come back as `None`.
    async fn audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, CatalogError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistSummary, CatalogError>;

    /// Append at most [`PLAYLIST_ADD_BATCH_SIZE`] tracks, preserving order.
    async fn add_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), CatalogError>;

    /// One page of the playlists the current user follows.
    async fn current_user_playlists(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Page<PlaylistSummary>, CatalogError>;

    async fn unfollow_playlist(&self, user_id: &str, playlist_id: &str)
        -> Result<(), CatalogError>;
}

/// Snapshot of a user's credentials, captured when a job is launched.
#[derive(Clone)]
pub struct ClientCredentials {
    pub access_token: String,
}

impl ClientCredentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Builds authenticated clients from credential snapshots.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CatalogClientFactory: Send + Sync {
    fn client_for(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<Arc<dyn MusicCatalogClient>, CatalogError>;
}
