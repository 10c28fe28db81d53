use super::track::{Track, TrackFeatures};
use crate::catalog_client::{CatalogError, MusicCatalogClient, LOOKUP_BATCH_SIZE};
use crate::metrics;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Attach artist genre tags and audio features to every track.
///
/// Tracks are processed in chunks of [`LOOKUP_BATCH_SIZE`]; each chunk issues
/// one artist lookup and one audio-feature lookup concurrently. Responses are
/// matched back to tracks by id, so the catalog may reorder or omit entries.
pub async fn enrich_tracks(
    client: &dyn MusicCatalogClient,
    tracks: &mut [Track],
) -> Result<(), CatalogError> {
    let total_chunks = tracks.len().div_ceil(LOOKUP_BATCH_SIZE);

    for (chunk_index, chunk) in tracks.chunks_mut(LOOKUP_BATCH_SIZE).enumerate() {
        let artist_ids = unique_artist_ids(chunk);
        let track_ids: Vec<String> = chunk.iter().map(|t| t.id.clone()).collect();

        let (artists, features) = futures::try_join!(
            client.artists(&artist_ids),
            client.audio_features(&track_ids)
        )?;
        metrics::record_catalog_request("artists");
        metrics::record_catalog_request("audio_features");

        let genres_by_artist: HashMap<String, Vec<String>> = artists
            .into_iter()
            .map(|artist| (artist.id, artist.genres))
            .collect();
        let features_by_track: HashMap<String, TrackFeatures> = features
            .iter()
            .flatten()
            .map(|f| (f.id.clone(), TrackFeatures::from(f)))
            .collect();

        for track in chunk.iter_mut() {
            track.genres = match genres_by_artist.get(&track.artist_id) {
                Some(genres) => genres.iter().cloned().collect(),
                None => {
                    warn!(
                        "No artist record for {} (track {})",
                        track.artist_id, track.id
                    );
                    BTreeSet::new()
                }
            };

            track.features = match features_by_track.get(&track.id) {
                Some(features) => *features,
                None => {
                    warn!("No audio features for track {}, using zeros", track.id);
                    TrackFeatures::default()
                }
            };
        }

        debug!(
            "Enriched chunk {}/{} ({} tracks)",
            chunk_index + 1,
            total_chunks,
            chunk.len()
        );
    }

    info!("Enriched {} tracks", tracks.len());
    Ok(())
}

fn unique_artist_ids(chunk: &[Track]) -> Vec<String> {
    let mut seen = HashSet::new();
    chunk
        .iter()
        .filter(|track| seen.insert(track.artist_id.as_str()))
        .map(|track| track.artist_id.clone())
        .collect()
}
