use super::macro_genre::MacroGenre;

/// Lookup from a niche catalog genre tag to its macro-genre.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait GenreTaxonomy: Send + Sync {
    /// Tags the taxonomy does not know map to [`MacroGenre::Others`].
    fn macro_genre(&self, tag: &str) -> MacroGenre;
}

/// Keyword rules checked in order against the words of the lowercased tag.
/// A keyword matches only as a whole run of words, so `emo` does not match
/// `demo`.
const KEYWORD_RULES: &[(&str, MacroGenre)] = &[
    ("soundtrack", MacroGenre::Soundtracks),
    ("score", MacroGenre::Soundtracks),
    ("video game music", MacroGenre::Soundtracks),
    ("show tunes", MacroGenre::Soundtracks),
    ("classical", MacroGenre::Classical),
    ("baroque", MacroGenre::Classical),
    ("orchestra", MacroGenre::Classical),
    ("opera", MacroGenre::Classical),
    ("choral", MacroGenre::Classical),
    ("experimental", MacroGenre::Experimental),
    ("avant-garde", MacroGenre::Experimental),
    ("noise", MacroGenre::Experimental),
    ("drone", MacroGenre::Experimental),
    ("jazz", MacroGenre::Jazz),
    ("bebop", MacroGenre::Jazz),
    ("swing", MacroGenre::Jazz),
    ("bossa nova", MacroGenre::Jazz),
    ("country", MacroGenre::CountryFolk),
    ("folk", MacroGenre::CountryFolk),
    ("bluegrass", MacroGenre::CountryFolk),
    ("americana", MacroGenre::CountryFolk),
    ("singer-songwriter", MacroGenre::CountryFolk),
    ("funk", MacroGenre::Funk),
    ("funky", MacroGenre::Funk),
    ("disco", MacroGenre::Funk),
    ("indie", MacroGenre::Indie),
    ("shoegaze", MacroGenre::Indie),
    ("lo-fi", MacroGenre::Indie),
    ("bedroom", MacroGenre::Indie),
    ("hip hop", MacroGenre::HipHop),
    ("hip-hop", MacroGenre::HipHop),
    ("rap", MacroGenre::HipHop),
    ("trap", MacroGenre::HipHop),
    ("drill", MacroGenre::HipHop),
    ("grime", MacroGenre::HipHop),
    ("r&b", MacroGenre::RnbSoul),
    ("rnb", MacroGenre::RnbSoul),
    ("soul", MacroGenre::RnbSoul),
    ("motown", MacroGenre::RnbSoul),
    ("gospel", MacroGenre::RnbSoul),
    ("rock", MacroGenre::Rock),
    ("metal", MacroGenre::Rock),
    ("punk", MacroGenre::Rock),
    ("grunge", MacroGenre::Rock),
    ("emo", MacroGenre::Rock),
    ("hardcore", MacroGenre::Rock),
    ("electronic", MacroGenre::Electronic),
    ("electro", MacroGenre::Electronic),
    ("edm", MacroGenre::Electronic),
    ("house", MacroGenre::Electronic),
    ("techno", MacroGenre::Electronic),
    ("trance", MacroGenre::Electronic),
    ("dubstep", MacroGenre::Electronic),
    ("drum and bass", MacroGenre::Electronic),
    ("ambient", MacroGenre::Electronic),
    ("synthwave", MacroGenre::Electronic),
    ("trip hop", MacroGenre::Electronic),
    ("pop", MacroGenre::Pop),
    ("synthpop", MacroGenre::Pop),
    ("electropop", MacroGenre::Pop),
    ("dance", MacroGenre::Pop),
    ("boy band", MacroGenre::Pop),
    ("girl group", MacroGenre::Pop),
];

/// Built-in keyword taxonomy used when no external table is supplied.
#[derive(Debug, Clone, Default)]
pub struct StaticGenreTaxonomy;

impl StaticGenreTaxonomy {
    pub fn new() -> Self {
        Self
    }
}

impl GenreTaxonomy for StaticGenreTaxonomy {
    fn macro_genre(&self, tag: &str) -> MacroGenre {
        let tag = tag.to_lowercase();
        let words = split_words(&tag);
        KEYWORD_RULES
            .iter()
            .find(|(keyword, _)| {
                let keyword_words = split_words(keyword);
                words
                    .windows(keyword_words.len())
                    .any(|window| window == keyword_words.as_slice())
            })
            .map(|(_, genre)| *genre)
            .unwrap_or(MacroGenre::Others)
    }
}

/// Words of a genre tag. `&` stays inside a word so `r&b` survives.
fn split_words(tag: &str) -> Vec<&str> {
    tag.split(|c: char| !(c.is_alphanumeric() || c == '&'))
        .filter(|word| !word.is_empty())
        .collect()
}
