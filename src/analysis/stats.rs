use super::{AnalysisText, AnalysisTextGenerator};
use crate::genres::{dominant_genre, MacroGenre};
use crate::library::Track;
use std::collections::HashMap;

/// Default generator: genre distribution, favourite decade and a few
/// audio-feature averages.
#[derive(Debug, Clone, Default)]
pub struct LibraryStatsAnalyzer;

impl LibraryStatsAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisTextGenerator for LibraryStatsAnalyzer {
    fn describe(&self, tracks: &[Track]) -> AnalysisText {
        if tracks.is_empty() {
            return AnalysisText {
                lines: vec!["No saved tracks to analyze.".to_string()],
            };
        }

        let total = tracks.len();
        let mut lines = vec![format!("{} saved tracks analyzed.", total)];

        let mut genre_counts: HashMap<MacroGenre, usize> = HashMap::new();
        for track in tracks {
            *genre_counts.entry(dominant_genre(&track.genres)).or_default() += 1;
        }
        let mut genre_counts: Vec<(MacroGenre, usize)> = genre_counts.into_iter().collect();
        genre_counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (genre, count) in genre_counts {
            let share = count as f64 * 100.0 / total as f64;
            lines.push(format!("{}: {} tracks ({:.1}%)", genre, count, share));
        }

        if let Some(decade) = most_common_decade(tracks) {
            lines.push(format!("Most of your music was released in the {}s.", decade));
        }

        let average = |value: fn(&Track) -> f64| -> f64 {
            tracks.iter().map(value).sum::<f64>() / total as f64
        };
        lines.push(format!(
            "Average popularity: {:.1}/100",
            average(|t| t.track_popularity as f64)
        ));
        lines.push(format!(
            "Average valence: {:.2}",
            average(|t| t.features.valence)
        ));
        lines.push(format!("Average energy: {:.2}", average(|t| t.features.energy)));
        lines.push(format!(
            "Average danceability: {:.2}",
            average(|t| t.features.danceability)
        ));

        AnalysisText { lines }
    }
}

/// Decades are read from the leading year of the release date; the earliest
/// decade wins ties.
fn most_common_decade(tracks: &[Track]) -> Option<i32> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for track in tracks {
        let year = track
            .album_release_date
            .get(..4)
            .and_then(|y| y.parse::<i32>().ok());
        if let Some(year) = year {
            *counts.entry(year - year.rem_euclid(10)).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(decade, _)| decade)
}
