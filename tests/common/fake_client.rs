//! In-memory stand-in for the music catalog

use super::fixtures::SyntheticLibrary;
use async_trait::async_trait;
use genrify::catalog_client::{
    ArtistProfile, AudioFeatures, CatalogClientFactory, CatalogError, ClientCredentials,
    MusicCatalogClient, Page, PlaylistSummary, SavedItem, LOOKUP_BATCH_SIZE,
    PLAYLIST_ADD_BATCH_SIZE,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A playlist as stored by the fake catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FakePlaylist {
    pub id: String,
    pub name: String,
    pub public: bool,
    pub track_ids: Vec<String>,
}

#[derive(Default)]
struct FakeState {
    saved_items: Vec<SavedItem>,
    artists: HashMap<String, ArtistProfile>,
    audio_features: HashMap<String, AudioFeatures>,
    playlists: Vec<FakePlaylist>,
    next_playlist_id: usize,
    calls: HashMap<&'static str, usize>,
    saved_tracks_error: Option<String>,
}

/// Catalog client backed by plain collections.
///
/// Enforces the same page and batch ceilings as the real catalog and counts
/// every call so tests can assert on memoization.
#[derive(Default)]
pub struct FakeCatalogClient {
    state: Mutex<FakeState>,
}

impl FakeCatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: SyntheticLibrary) -> Self {
        let client = Self::new();
        {
            let mut state = client.state.lock().unwrap();
            state.saved_items = library.saved_items;
            state.artists = library
                .artists
                .into_iter()
                .map(|a| (a.id.clone(), a))
                .collect();
            state.audio_features = library
                .audio_features
                .into_iter()
                .map(|f| (f.id.clone(), f))
                .collect();
        }
        client
    }

    /// Seed playlists the user already follows.
    pub fn with_playlists(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for name in names {
                let id = format!("existing-{}", state.next_playlist_id);
                state.next_playlist_id += 1;
                state.playlists.push(FakePlaylist {
                    id,
                    name: name.to_string(),
                    public: true,
                    track_ids: Vec::new(),
                });
            }
        }
        self
    }

    /// Make every saved-tracks request fail with `message`.
    pub fn failing_saved_tracks(self, message: &str) -> Self {
        self.state.lock().unwrap().saved_tracks_error = Some(message.to_string());
        self
    }

    pub fn playlists(&self) -> Vec<FakePlaylist> {
        self.state.lock().unwrap().playlists.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    fn record(state: &mut FakeState, operation: &'static str) {
        *state.calls.entry(operation).or_default() += 1;
    }

    fn page_of<T: Clone>(items: &[T], limit: usize, offset: usize) -> Page<T> {
        let end = (offset + limit).min(items.len());
        let start = offset.min(end);
        Page {
            items: items[start..end].to_vec(),
            next: (end < items.len()).then(|| format!("offset={}", end)),
        }
    }
}

#[async_trait]
impl MusicCatalogClient for FakeCatalogClient {
    async fn saved_tracks(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Page<SavedItem>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "saved_tracks");
        if let Some(message) = &state.saved_tracks_error {
            return Err(CatalogError::Connection(message.clone()));
        }
        Ok(Self::page_of(&state.saved_items, limit, offset))
    }

    async fn artists(&self, artist_ids: &[String]) -> Result<Vec<ArtistProfile>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "artists");
        if artist_ids.len() > LOOKUP_BATCH_SIZE {
            return Err(CatalogError::Api {
                status: 400,
                message: "too many ids".to_string(),
            });
        }
        Ok(artist_ids
            .iter()
            .filter_map(|id| state.artists.get(id).cloned())
            .collect())
    }

    async fn audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "audio_features");
        if track_ids.len() > LOOKUP_BATCH_SIZE {
            return Err(CatalogError::Api {
                status: 400,
                message: "too many ids".to_string(),
            });
        }
        // answer in reverse order to catch positional merging
        Ok(track_ids
            .iter()
            .rev()
            .map(|id| state.audio_features.get(id).cloned())
            .collect())
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistSummary, CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "create_playlist");
        let id = format!("created-{}", state.next_playlist_id);
        state.next_playlist_id += 1;
        state.playlists.push(FakePlaylist {
            id: id.clone(),
            name: name.to_string(),
            public,
            track_ids: Vec::new(),
        });
        Ok(PlaylistSummary {
            id,
            name: name.to_string(),
        })
    }

    async fn add_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "add_playlist_items");
        if track_ids.len() > PLAYLIST_ADD_BATCH_SIZE {
            return Err(CatalogError::Api {
                status: 400,
                message: "too many tracks".to_string(),
            });
        }
        let playlist = state
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| CatalogError::Api {
                status: 404,
                message: format!("no playlist {}", playlist_id),
            })?;
        playlist.track_ids.extend(track_ids.iter().cloned());
        Ok(())
    }

    async fn current_user_playlists(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Page<PlaylistSummary>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "current_user_playlists");
        let summaries: Vec<PlaylistSummary> = state
            .playlists
            .iter()
            .map(|p| PlaylistSummary {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .collect();
        Ok(Self::page_of(&summaries, limit, offset))
    }

    async fn unfollow_playlist(
        &self,
        _user_id: &str,
        playlist_id: &str,
    ) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "unfollow_playlist");
        let before = state.playlists.len();
        state.playlists.retain(|p| p.id != playlist_id);
        if state.playlists.len() == before {
            return Err(CatalogError::Api {
                status: 404,
                message: format!("no playlist {}", playlist_id),
            });
        }
        Ok(())
    }
}

/// Hands out the same shared fake client for any credentials.
pub struct FakeClientFactory {
    client: Arc<FakeCatalogClient>,
}

impl FakeClientFactory {
    pub fn new(client: Arc<FakeCatalogClient>) -> Self {
        Self { client }
    }
}

impl CatalogClientFactory for FakeClientFactory {
    fn client_for(
        &self,
        _credentials: &ClientCredentials,
    ) -> Result<Arc<dyn MusicCatalogClient>, CatalogError> {
        let client: Arc<dyn MusicCatalogClient> = self.client.clone();
        Ok(client)
    }
}
