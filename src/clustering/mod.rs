//! Feature vectors, k-means clustering and cluster naming.
//!
//! Centroids are seeded randomly, so two runs over the same library may
//! group and name tracks differently.

mod features;
mod kmeans;
mod naming;

pub use features::{
    parse_release_date, vectorize, DateRange, FeatureMatrix, FeatureVector, AGE_DIMENSION,
    FEATURE_DIMENSIONS, GENRE_DIMENSION,
};
pub use kmeans::{kmeans, KMeansModel, MAX_ITERATIONS};
pub use naming::cluster_name;

use crate::library::Track;
use rand::Rng;
use thiserror::Error;
use tracing::info;

/// Library size covered by each additional cluster.
const TRACKS_PER_CLUSTER: usize = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ClusteringError {
    #[error("No tracks to cluster")]
    EmptyLibrary,

    #[error("Track {track_id} has a non-finite value in feature dimension {dimension}")]
    NonFiniteFeature { track_id: String, dimension: usize },
}

/// A group of tracks that will become one playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: usize,
    pub centroid: FeatureVector,
    /// Member ids in library order.
    pub member_track_ids: Vec<String>,
    pub derived_name: String,
}

/// Number of clusters for a library of `track_count` tracks.
pub fn cluster_count(track_count: usize) -> usize {
    track_count / TRACKS_PER_CLUSTER + 1
}

/// Vectorize, cluster and name a genre-normalized library.
///
/// Clusters that end up with no members are dropped; the rest are returned
/// ordered by id.
pub fn cluster_library<R: Rng>(
    tracks: &[Track],
    rng: &mut R,
) -> Result<Vec<Cluster>, ClusteringError> {
    if tracks.is_empty() {
        return Err(ClusteringError::EmptyLibrary);
    }

    let matrix = vectorize(tracks)?;
    let k = cluster_count(tracks.len());
    let model = kmeans(&matrix.rows, k, MAX_ITERATIONS, rng);

    let mut members: Vec<Vec<String>> = vec![Vec::new(); model.centroids.len()];
    for (track, &cluster) in tracks.iter().zip(&model.assignments) {
        members[cluster].push(track.id.clone());
    }

    let clusters: Vec<Cluster> = model
        .centroids
        .iter()
        .zip(members)
        .enumerate()
        .filter(|(_, (_, member_track_ids))| !member_track_ids.is_empty())
        .map(|(id, (centroid, member_track_ids))| Cluster {
            id,
            centroid: *centroid,
            member_track_ids,
            derived_name: cluster_name(centroid, &matrix.date_range),
        })
        .collect();

    info!(
        "Clustered {} tracks into {} clusters (k={})",
        tracks.len(),
        clusters.len(),
        k
    );
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::TrackFeatures;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{BTreeSet, HashSet};

    fn track(index: usize, year: i32, genre: &str) -> Track {
        Track {
            id: format!("t{}", index),
            added_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            album_name: "Album".to_string(),
            album_release_date: year.to_string(),
            artist_names: "Artist".to_string(),
            artist_id: "a".to_string(),
            track_name: "Song".to_string(),
            track_popularity: (index * 3 % 101) as u32,
            genres: BTreeSet::from([genre.to_string()]),
            features: TrackFeatures {
                valence: 0.5,
                danceability: 0.5,
                energy: 0.5,
                acousticness: 0.5,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_cluster_count() {
        assert_eq!(cluster_count(1), 1);
        assert_eq!(cluster_count(29), 1);
        assert_eq!(cluster_count(30), 2);
        assert_eq!(cluster_count(59), 2);
        assert_eq!(cluster_count(60), 3);
    }

    #[test]
    fn test_empty_library_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            cluster_library(&[], &mut rng).unwrap_err(),
            ClusteringError::EmptyLibrary
        );
    }

    #[test]
    fn test_every_track_lands_in_exactly_one_cluster() {
        let genres = ["Rock", "Jazz", "Electronic"];
        let tracks: Vec<Track> = (0..65)
            .map(|i| track(i, 1980 + (i % 40) as i32, genres[i % 3]))
            .collect();

        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let clusters = cluster_library(&tracks, &mut rng).unwrap();

            assert!(!clusters.is_empty() && clusters.len() <= 3);
            let mut seen = HashSet::new();
            for cluster in &clusters {
                assert!(!cluster.member_track_ids.is_empty());
                assert!(cluster.derived_name.contains("'s "));
                for id in &cluster.member_track_ids {
                    assert!(seen.insert(id.clone()), "duplicate {}", id);
                }
            }
            assert_eq!(seen.len(), tracks.len());
        }
    }

    #[test]
    fn test_single_track_library() {
        let tracks = vec![track(0, 1999, "Jazz")];
        let mut rng = StdRng::seed_from_u64(42);

        let clusters = cluster_library(&tracks, &mut rng).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].id, 0);
        assert_eq!(clusters[0].member_track_ids, vec!["t0".to_string()]);
        assert_eq!(clusters[0].derived_name, "1999's Jazz");
    }

    #[test]
    fn test_members_keep_library_order() {
        let tracks: Vec<Track> = (0..10).map(|i| track(i, 2001, "Pop")).collect();
        let mut rng = StdRng::seed_from_u64(5);

        let clusters = cluster_library(&tracks, &mut rng).unwrap();

        assert_eq!(clusters.len(), 1);
        let expected: Vec<String> = (0..10).map(|i| format!("t{}", i)).collect();
        assert_eq!(clusters[0].member_track_ids, expected);
    }
}
