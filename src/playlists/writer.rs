use super::GENERATED_PLAYLIST_PREFIX;
use crate::catalog_client::{
    CatalogError, MusicCatalogClient, PlaylistSummary, PLAYLIST_ADD_BATCH_SIZE,
};
use crate::clustering::Cluster;
use crate::metrics;
use tracing::{debug, info};

/// Display name for a cluster's playlist, numbered from 1.
pub fn playlist_name(cluster: &Cluster) -> String {
    format!(
        "{}_{}_{}",
        GENERATED_PLAYLIST_PREFIX,
        cluster.id + 1,
        cluster.derived_name
    )
}

/// Create one private playlist per cluster and fill it with the cluster's
/// tracks, in order, [`PLAYLIST_ADD_BATCH_SIZE`] at a time.
pub async fn write_playlists(
    client: &dyn MusicCatalogClient,
    user_id: &str,
    clusters: &[Cluster],
) -> Result<Vec<PlaylistSummary>, CatalogError> {
    let mut created = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let name = playlist_name(cluster);
        let playlist = client.create_playlist(user_id, &name, false).await?;
        metrics::record_catalog_request("create_playlist");
        metrics::record_playlist_created();

        for batch in cluster.member_track_ids.chunks(PLAYLIST_ADD_BATCH_SIZE) {
            client.add_playlist_items(&playlist.id, batch).await?;
            metrics::record_catalog_request("add_playlist_items");
            debug!("Added {} tracks to {}", batch.len(), playlist.name);
        }

        info!(
            "Created playlist '{}' with {} tracks",
            playlist.name,
            cluster.member_track_ids.len()
        );
        created.push(playlist);
    }

    Ok(created)
}
