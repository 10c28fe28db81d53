use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse genre bucket that niche catalog tags are folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MacroGenre {
    Soundtracks,
    Classical,
    Experimental,
    Jazz,
    #[serde(rename = "Country/Folk")]
    CountryFolk,
    Funk,
    Indie,
    Rock,
    #[serde(rename = "RnB/Soul")]
    RnbSoul,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    Electronic,
    Pop,
    Others,
}

/// Order in which a multi-genre track picks its single dominant genre.
pub const PRIORITY_ORDER: [MacroGenre; 13] = [
    MacroGenre::Soundtracks,
    MacroGenre::Classical,
    MacroGenre::Experimental,
    MacroGenre::Jazz,
    MacroGenre::CountryFolk,
    MacroGenre::Funk,
    MacroGenre::Indie,
    MacroGenre::Rock,
    MacroGenre::RnbSoul,
    MacroGenre::HipHop,
    MacroGenre::Electronic,
    MacroGenre::Pop,
    MacroGenre::Others,
];

/// Ordinal genre scores. Iteration order matters: closest-score lookups
/// keep the first entry on ties.
pub const SCORE_TABLE: [(MacroGenre, f64); 13] = [
    (MacroGenre::Soundtracks, 0.0),
    (MacroGenre::Classical, 10.0),
    (MacroGenre::Jazz, 20.0),
    (MacroGenre::CountryFolk, 40.0),
    (MacroGenre::RnbSoul, 60.0),
    (MacroGenre::Pop, 80.0),
    (MacroGenre::Funk, 100.0),
    (MacroGenre::Indie, 120.0),
    (MacroGenre::Rock, 140.0),
    (MacroGenre::HipHop, 160.0),
    (MacroGenre::Electronic, 180.0),
    (MacroGenre::Experimental, 200.0),
    (MacroGenre::Others, 250.0),
];

/// Score used for labels outside the taxonomy.
pub const UNMAPPED_GENRE_SCORE: f64 = 250.0;

impl MacroGenre {
    pub fn label(&self) -> &'static str {
        match self {
            MacroGenre::Soundtracks => "Soundtracks",
            MacroGenre::Classical => "Classical",
            MacroGenre::Experimental => "Experimental",
            MacroGenre::Jazz => "Jazz",
            MacroGenre::CountryFolk => "Country/Folk",
            MacroGenre::Funk => "Funk",
            MacroGenre::Indie => "Indie",
            MacroGenre::Rock => "Rock",
            MacroGenre::RnbSoul => "RnB/Soul",
            MacroGenre::HipHop => "Hip-Hop",
            MacroGenre::Electronic => "Electronic",
            MacroGenre::Pop => "Pop",
            MacroGenre::Others => "Others",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        PRIORITY_ORDER.iter().copied().find(|g| g.label() == label)
    }

    pub fn score(&self) -> f64 {
        SCORE_TABLE
            .iter()
            .find(|(genre, _)| genre == self)
            .map(|(_, score)| *score)
            .unwrap_or(UNMAPPED_GENRE_SCORE)
    }

    /// Table entry whose score is closest to the integer part of `value`.
    pub fn closest_to_score(value: f64) -> Self {
        let target = value.trunc();
        let mut closest = MacroGenre::Others;
        let mut min_difference = f64::INFINITY;
        for (genre, score) in SCORE_TABLE {
            let difference = (target - score).abs();
            if difference < min_difference {
                min_difference = difference;
                closest = genre;
            }
        }
        closest
    }
}

impl fmt::Display for MacroGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Collapse a set of macro-genre labels into the single highest-priority one.
pub fn dominant_genre<I, S>(labels: I) -> MacroGenre
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<MacroGenre> = labels
        .into_iter()
        .filter_map(|label| MacroGenre::parse(label.as_ref()))
        .collect();

    PRIORITY_ORDER
        .iter()
        .copied()
        .find(|genre| present.contains(genre))
        .unwrap_or(MacroGenre::Others)
}

/// Ordinal score for a label, falling back to [`UNMAPPED_GENRE_SCORE`].
pub fn genre_score(label: &str) -> f64 {
    MacroGenre::parse(label)
        .map(|genre| genre.score())
        .unwrap_or(UNMAPPED_GENRE_SCORE)
}
