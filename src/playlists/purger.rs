use super::GENERATED_PLAYLIST_PREFIX;
use crate::catalog_client::{
    CatalogError, MusicCatalogClient, PLAYLIST_PAGE_SIZE, UNFOLLOW_BATCH_SIZE,
};
use crate::metrics;
use tracing::{debug, info};

/// Remove every playlist the user follows whose name starts with
/// [`GENERATED_PLAYLIST_PREFIX`]. Returns how many were removed.
///
/// All pages are listed before anything is removed so that removals do not
/// shift the offsets being paged through.
pub async fn purge_generated_playlists(
    client: &dyn MusicCatalogClient,
    user_id: &str,
) -> Result<usize, CatalogError> {
    let mut to_delete = Vec::new();
    let mut offset = 0;

    loop {
        let page = client
            .current_user_playlists(PLAYLIST_PAGE_SIZE, offset)
            .await?;
        metrics::record_catalog_request("current_user_playlists");

        to_delete.extend(
            page.items
                .into_iter()
                .filter(|playlist| playlist.name.starts_with(GENERATED_PLAYLIST_PREFIX))
                .map(|playlist| playlist.id),
        );

        if page.next.is_none() {
            break;
        }
        offset += PLAYLIST_PAGE_SIZE;
    }

    info!(
        "Found {} generated playlists to remove for {}",
        to_delete.len(),
        user_id
    );

    for batch in to_delete.chunks(UNFOLLOW_BATCH_SIZE) {
        for playlist_id in batch {
            client.unfollow_playlist(user_id, playlist_id).await?;
            metrics::record_catalog_request("unfollow_playlist");
            metrics::record_playlist_deleted();
        }
        debug!("Removed batch of {} playlists", batch.len());
    }

    Ok(to_delete.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_client::{MockMusicCatalogClient, Page, PlaylistSummary};
    use mockall::predicate::eq;

    fn playlist(id: &str, name: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_removes_only_prefixed_playlists_across_pages() {
        let mut client = MockMusicCatalogClient::new();
        client
            .expect_current_user_playlists()
            .with(eq(PLAYLIST_PAGE_SIZE), eq(0))
            .returning(|_, _| {
                Ok(Page {
                    items: vec![playlist("p1", "Genrify_1_1999's Rock"), playlist("p2", "MyMix")],
                    next: Some("more".to_string()),
                })
            });
        client
            .expect_current_user_playlists()
            .with(eq(PLAYLIST_PAGE_SIZE), eq(PLAYLIST_PAGE_SIZE))
            .returning(|_, _| {
                Ok(Page {
                    items: vec![playlist("p3", "Genrify_2_2010's Pop")],
                    next: None,
                })
            });
        client
            .expect_unfollow_playlist()
            .with(eq("alice"), eq("p1"))
            .times(1)
            .returning(|_, _| Ok(()));
        client
            .expect_unfollow_playlist()
            .with(eq("alice"), eq("p3"))
            .times(1)
            .returning(|_, _| Ok(()));

        let removed = purge_generated_playlists(&client, "alice").await.unwrap();
        assert_eq!(removed, 2);
    }

    #[tokio::test]
    async fn test_prefix_is_case_sensitive() {
        let mut client = MockMusicCatalogClient::new();
        client.expect_current_user_playlists().returning(|_, _| {
            Ok(Page {
                items: vec![playlist("p1", "genrify lowercase"), playlist("p2", "My Genrify")],
                next: None,
            })
        });
        client.expect_unfollow_playlist().times(0);

        let removed = purge_generated_playlists(&client, "alice").await.unwrap();
        assert_eq!(removed, 0);
    }
}
