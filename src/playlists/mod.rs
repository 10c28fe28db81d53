//! Writing clusters out as playlists and removing them again.

mod purger;
mod writer;

pub use purger::purge_generated_playlists;
pub use writer::{playlist_name, write_playlists};

/// Every generated playlist name starts with this prefix.
pub const GENERATED_PLAYLIST_PREFIX: &str = "Genrify";
