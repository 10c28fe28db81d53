//! Common test infrastructure
//!
//! Integration suites import from this module only. The fake catalog keeps
//! everything in memory and counts calls, so memoization and batching can be
//! asserted without a network.

mod constants;
mod fake_client;
mod fixtures;

#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fake_client::{FakeCatalogClient, FakeClientFactory, FakePlaylist};
#[allow(unused_imports)]
pub use fixtures::{synthetic_library, SyntheticLibrary};

use genrify::{
    CacheStore, ClientCredentials, InMemoryCacheStore, JobKind, JobOrchestrator, JobStatus,
};
use std::sync::Arc;

/// Orchestrator wired to a fresh in-memory cache and a shared fake client.
#[allow(dead_code)]
pub struct TestHarness {
    pub cache: Arc<dyn CacheStore>,
    pub client: Arc<FakeCatalogClient>,
    pub orchestrator: JobOrchestrator,
}

#[allow(dead_code)]
impl TestHarness {
    pub fn new(client: FakeCatalogClient) -> Self {
        Self::with_cache(client, Arc::new(InMemoryCacheStore::new()))
    }

    pub fn with_cache(client: FakeCatalogClient, cache: Arc<dyn CacheStore>) -> Self {
        let client = Arc::new(client);
        let factory = Arc::new(FakeClientFactory::new(Arc::clone(&client)));
        let orchestrator = JobOrchestrator::new(Arc::clone(&cache), factory);
        Self {
            cache,
            client,
            orchestrator,
        }
    }

    /// Launch `kind` for `user_id` and wait for its terminal status.
    pub async fn run(&self, user_id: &str, kind: JobKind) -> JobStatus {
        self.orchestrator
            .launch(user_id, ClientCredentials::new(TEST_TOKEN), kind)
            .expect("launch failed")
            .await
            .expect("job task failed")
    }
}
