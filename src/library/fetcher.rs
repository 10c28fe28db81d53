use crate::cache::{CacheKeys, CacheStore, CacheStoreExt, DERIVED_ENTRY_TTL};
use crate::catalog_client::{
    CatalogError, MusicCatalogClient, SavedItem, SAVED_TRACKS_PAGE_SIZE,
};
use crate::jobs::PipelineError;
use crate::metrics;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The raw collection was already cached; nothing was requested.
    Cached,
    /// The collection was fetched and cached. Holds the item count.
    Fetched(usize),
}

/// Make sure the user's full saved-item collection is cached.
///
/// A live cache entry suppresses the fetch entirely, even if the library has
/// changed since it was written.
pub async fn fetch_saved_tracks(
    cache: &dyn CacheStore,
    client: &dyn MusicCatalogClient,
    keys: &CacheKeys,
) -> Result<FetchOutcome, PipelineError> {
    let key = keys.raw_tracks();
    if cache.exists(&key)? {
        metrics::record_cache_lookup("raw_tracks", true);
        debug!("Saved tracks for {} already cached", keys.user_id());
        return Ok(FetchOutcome::Cached);
    }
    metrics::record_cache_lookup("raw_tracks", false);

    let items = fetch_all_pages(client).await?;
    let count = items.len();
    cache.set_json_with_ttl(&key, &items, DERIVED_ENTRY_TTL)?;

    info!("Cached {} saved tracks for {}", count, keys.user_id());
    Ok(FetchOutcome::Fetched(count))
}

async fn fetch_all_pages(client: &dyn MusicCatalogClient) -> Result<Vec<SavedItem>, CatalogError> {
    let mut items = Vec::new();
    let mut offset = 0;

    loop {
        let page = client.saved_tracks(SAVED_TRACKS_PAGE_SIZE, offset).await?;
        metrics::record_catalog_request("saved_tracks");
        debug!(
            "Fetched {} saved tracks at offset {}",
            page.items.len(),
            offset
        );

        items.extend(page.items);
        if page.next.is_none() {
            break;
        }
        offset += SAVED_TRACKS_PAGE_SIZE;
    }

    Ok(items)
}
