use super::job::JobKind;
use crate::analysis::{AnalysisText, AnalysisTextGenerator};
use crate::cache::{CacheKeys, CacheStore, CacheStoreExt, DERIVED_ENTRY_TTL};
use crate::catalog_client::{CatalogError, MusicCatalogClient, PlaylistSummary, SavedItem};
use crate::clustering::{cluster_library, ClusteringError};
use crate::genres::{normalize_genres, GenreTaxonomy};
use crate::library::{
    enrich_tracks, fetch_saved_tracks, simplify_saved_items, FetchOutcome, SimplifyError, Track,
};
use crate::metrics;
use crate::playlists::{purge_generated_playlists, write_playlists};
use rand::Rng;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Any failure inside a pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Simplify(#[from] SimplifyError),

    #[error(transparent)]
    Clustering(#[from] ClusteringError),

    #[error("Cache error: {0}")]
    Cache(#[from] anyhow::Error),

    #[error("Malformed cache entry: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache entry {0} is missing")]
    MissingCacheEntry(String),
}

/// Read-only view of a user's cached stage outputs.
#[derive(Clone)]
pub struct CachedResults {
    cache: Arc<dyn CacheStore>,
    keys: CacheKeys,
}

impl CachedResults {
    pub fn new(cache: Arc<dyn CacheStore>, user_id: &str) -> Self {
        Self {
            cache,
            keys: CacheKeys::for_user(user_id),
        }
    }

    pub fn cached_saved_items(&self) -> Result<Option<Vec<SavedItem>>, PipelineError> {
        Ok(self.cache.get_json(&self.keys.raw_tracks())?)
    }

    pub fn cached_analysis(&self) -> Result<Option<Vec<Track>>, PipelineError> {
        Ok(self.cache.get_json(&self.keys.analysis())?)
    }

    pub fn cached_analysis_text(&self) -> Result<Option<AnalysisText>, PipelineError> {
        Ok(self.cache.get_json(&self.keys.analysis_text())?)
    }
}

/// The four user pipelines, bound to one user and one catalog client.
///
/// Every stage memoizes its output in the cache for [`DERIVED_ENTRY_TTL`]
/// and is skipped while that entry is alive, so a retried job only redoes
/// the stages that had not finished.
pub struct GenrifyPipeline {
    cache: Arc<dyn CacheStore>,
    client: Arc<dyn MusicCatalogClient>,
    taxonomy: Arc<dyn GenreTaxonomy>,
    analyzer: Arc<dyn AnalysisTextGenerator>,
    keys: CacheKeys,
}

impl GenrifyPipeline {
    pub fn new(
        user_id: &str,
        cache: Arc<dyn CacheStore>,
        client: Arc<dyn MusicCatalogClient>,
        taxonomy: Arc<dyn GenreTaxonomy>,
        analyzer: Arc<dyn AnalysisTextGenerator>,
    ) -> Self {
        Self {
            cache,
            client,
            taxonomy,
            analyzer,
            keys: CacheKeys::for_user(user_id),
        }
    }

    pub fn user_id(&self) -> &str {
        self.keys.user_id()
    }

    pub fn results(&self) -> CachedResults {
        CachedResults::new(Arc::clone(&self.cache), self.user_id())
    }

    pub async fn run(&self, kind: JobKind) -> Result<(), PipelineError> {
        match kind {
            JobKind::GetTracks => self.get_tracks().await.map(|_| ()),
            JobKind::AnalyzeTracks => self.analyze_tracks().await.map(|_| ()),
            JobKind::OrganizeTracks => self.organize_tracks().await.map(|_| ()),
            JobKind::DeletePlaylists => self.delete_playlists().await.map(|_| ()),
        }
    }

    /// Cache the raw saved-item collection unless it is already cached.
    pub async fn get_tracks(&self) -> Result<FetchOutcome, PipelineError> {
        fetch_saved_tracks(self.cache.as_ref(), self.client.as_ref(), &self.keys).await
    }

    /// Fetch, simplify, enrich and normalize the library, then summarize it.
    ///
    /// Returns the analyzed tracks, from the cache when possible. The library
    /// is only fetched when the analysis itself has to be recomputed.
    pub async fn analyze_tracks(&self) -> Result<Vec<Track>, PipelineError> {
        let analysis_key = self.keys.analysis();
        let tracks = match self.cache.get(&analysis_key)? {
            Some(raw) => {
                metrics::record_cache_lookup("analysis", true);
                debug!("Analysis for {} already cached", self.user_id());
                serde_json::from_str::<Vec<Track>>(&raw)?
            }
            None => {
                metrics::record_cache_lookup("analysis", false);
                self.get_tracks().await?;
                let items: Vec<SavedItem> = self.load_required(&self.keys.raw_tracks())?;
                let mut tracks = simplify_saved_items(&items)?;
                enrich_tracks(self.client.as_ref(), &mut tracks).await?;
                normalize_genres(self.taxonomy.as_ref(), &mut tracks);
                self.cache
                    .set_json_with_ttl(&analysis_key, &tracks, DERIVED_ENTRY_TTL)?;
                info!("Analyzed {} tracks for {}", tracks.len(), self.user_id());
                tracks
            }
        };

        let text_key = self.keys.analysis_text();
        if self.cache.exists(&text_key)? {
            metrics::record_cache_lookup("analysis_text", true);
        } else {
            metrics::record_cache_lookup("analysis_text", false);
            let text = self.analyzer.describe(&tracks);
            self.cache
                .set_json_with_ttl(&text_key, &text, DERIVED_ENTRY_TTL)?;
        }

        Ok(tracks)
    }

    /// Analyze, cluster and write one playlist per cluster.
    pub async fn organize_tracks(&self) -> Result<Vec<PlaylistSummary>, PipelineError> {
        let tracks = self.analyze_tracks().await?;
        let clusters = {
            let mut rng = rand::rng();
            cluster_library(&tracks, &mut rng)?
        };
        Ok(write_playlists(self.client.as_ref(), self.user_id(), &clusters).await?)
    }

    /// [`GenrifyPipeline::organize_tracks`] with a caller-supplied random source.
    pub async fn organize_tracks_with_rng<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<PlaylistSummary>, PipelineError> {
        let tracks = self.analyze_tracks().await?;
        let clusters = cluster_library(&tracks, rng)?;
        Ok(write_playlists(self.client.as_ref(), self.user_id(), &clusters).await?)
    }

    /// Remove every generated playlist. Returns how many were removed.
    pub async fn delete_playlists(&self) -> Result<usize, PipelineError> {
        Ok(purge_generated_playlists(self.client.as_ref(), self.user_id()).await?)
    }

    fn load_required<T: DeserializeOwned>(&self, key: &str) -> Result<T, PipelineError> {
        let raw = self
            .cache
            .get(key)?
            .ok_or_else(|| PipelineError::MissingCacheEntry(key.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
