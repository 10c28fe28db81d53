//! Genrify Library
//!
//! Turns a user's saved tracks into clustered, automatically named playlists.
//! Jobs run in the background and report their progress through a per-user
//! status cell in the cache.

pub mod analysis;
pub mod cache;
pub mod catalog_client;
pub mod clustering;
pub mod config;
pub mod genres;
pub mod jobs;
pub mod library;
pub mod logging;
pub mod metrics;
pub mod playlists;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use cache::{CacheKeys, CacheStore, InMemoryCacheStore, SqliteCacheStore};
pub use catalog_client::{CatalogClientFactory, CatalogError, ClientCredentials, MusicCatalogClient};
pub use genres::{GenreTaxonomy, MacroGenre, StaticGenreTaxonomy};
pub use jobs::{GenrifyPipeline, JobKind, JobOrchestrator, JobStatus, PipelineError, StatusReport};
pub use library::Track;
