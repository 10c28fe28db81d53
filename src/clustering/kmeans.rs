use super::features::{FeatureVector, FEATURE_DIMENSIONS};
use rand::Rng;
use tracing::debug;

pub const MAX_ITERATIONS: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansModel {
    pub centroids: Vec<FeatureVector>,
    /// Nearest-centroid index of every input point, in input order.
    pub assignments: Vec<usize>,
    pub iterations: usize,
}

/// Lloyd's k-means with centroids seeded uniformly inside the bounding box
/// of the data.
///
/// Training stops when assignments no longer change or after
/// `max_iterations` rounds. A centroid that loses all of its points is
/// moved onto the point farthest from its own centroid. The returned
/// assignments are a final nearest-centroid search against the trained
/// centroids.
///
/// `k` is clamped to `1..=points.len()`. `points` must not be empty.
pub fn kmeans<R: Rng>(
    points: &[FeatureVector],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> KMeansModel {
    debug_assert!(!points.is_empty());
    let k = k.clamp(1, points.len().max(1));

    let mut centroids = random_centroids(points, k, rng);
    let mut assignments = assign(points, &centroids);
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;
        update_centroids(points, &assignments, &mut centroids);

        let next = assign(points, &centroids);
        if next == assignments {
            break;
        }
        assignments = next;
    }

    debug!(
        "k-means finished after {} iterations (k={}, n={})",
        iterations,
        k,
        points.len()
    );

    let assignments = assign(points, &centroids);
    KMeansModel {
        centroids,
        assignments,
        iterations,
    }
}

fn random_centroids<R: Rng>(
    points: &[FeatureVector],
    k: usize,
    rng: &mut R,
) -> Vec<FeatureVector> {
    let mut lower = [f64::INFINITY; FEATURE_DIMENSIONS];
    let mut upper = [f64::NEG_INFINITY; FEATURE_DIMENSIONS];
    for point in points {
        for d in 0..FEATURE_DIMENSIONS {
            lower[d] = lower[d].min(point[d]);
            upper[d] = upper[d].max(point[d]);
        }
    }

    (0..k)
        .map(|_| {
            let mut centroid = [0.0; FEATURE_DIMENSIONS];
            for d in 0..FEATURE_DIMENSIONS {
                centroid[d] = if upper[d] > lower[d] {
                    rng.random_range(lower[d]..=upper[d])
                } else {
                    lower[d]
                };
            }
            centroid
        })
        .collect()
}

fn squared_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the nearest centroid; the lowest index wins ties.
fn nearest(point: &FeatureVector, centroids: &[FeatureVector]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

fn assign(points: &[FeatureVector], centroids: &[FeatureVector]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids)).collect()
}

fn update_centroids(
    points: &[FeatureVector],
    assignments: &[usize],
    centroids: &mut [FeatureVector],
) {
    let k = centroids.len();
    let mut sums = vec![[0.0; FEATURE_DIMENSIONS]; k];
    let mut counts = vec![0usize; k];

    for (point, &cluster) in points.iter().zip(assignments) {
        counts[cluster] += 1;
        for d in 0..FEATURE_DIMENSIONS {
            sums[cluster][d] += point[d];
        }
    }

    for cluster in 0..k {
        if counts[cluster] > 0 {
            for d in 0..FEATURE_DIMENSIONS {
                centroids[cluster][d] = sums[cluster][d] / counts[cluster] as f64;
            }
        }
    }

    let empty: Vec<usize> = (0..k).filter(|&c| counts[c] == 0).collect();
    if empty.is_empty() {
        return;
    }

    let mut distances: Vec<f64> = points
        .iter()
        .zip(assignments)
        .map(|(point, &cluster)| squared_distance(point, &centroids[cluster]))
        .collect();
    for cluster in empty {
        let farthest = distances
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(index, _)| index);
        if let Some(index) = farthest {
            centroids[cluster] = points[index];
            distances[index] = f64::NEG_INFINITY;
        }
    }
}
