/// Per-user cache key namespace.
///
/// Keys are plain string concatenations on the user id so that entries
/// written by older deployments remain readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    user_id: String,
}

impl CacheKeys {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Raw saved-item collection as returned by the catalog.
    pub fn raw_tracks(&self) -> String {
        self.user_id.clone()
    }

    /// Enriched and genre-normalized track list.
    pub fn analysis(&self) -> String {
        format!("{}AN", self.user_id)
    }

    pub fn analysis_text(&self) -> String {
        format!("{}AN-Text", self.user_id)
    }

    /// Job status cell. Never expires.
    pub fn status(&self) -> String {
        format!("{}_status", self.user_id)
    }
}
