use super::macro_genre::MacroGenre;
use super::taxonomy::GenreTaxonomy;
use crate::library::Track;
use std::collections::BTreeSet;

/// Map niche tags to deduplicated macro-genre labels.
///
/// `Others` is dropped when any specific label is present, and an empty
/// result becomes `{"Others"}`, so the set is never empty.
pub fn resolve_macro_genres<I, S>(taxonomy: &dyn GenreTaxonomy, tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut genres: BTreeSet<MacroGenre> = tags
        .into_iter()
        .map(|tag| taxonomy.macro_genre(tag.as_ref()))
        .collect();

    if genres.len() > 1 {
        genres.remove(&MacroGenre::Others);
    }
    if genres.is_empty() {
        genres.insert(MacroGenre::Others);
    }

    genres.iter().map(|g| g.label().to_string()).collect()
}

/// Replace every track's niche tags with its macro-genre labels.
pub fn normalize_genres(taxonomy: &dyn GenreTaxonomy, tracks: &mut [Track]) {
    for track in tracks.iter_mut() {
        track.genres = resolve_macro_genres(taxonomy, &track.genres);
    }
}
