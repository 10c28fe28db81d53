use super::pipeline::PipelineError;
use crate::catalog_client::CatalogError;
use std::fmt;
use thiserror::Error;

/// The pipelines a user can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Fetch and cache the saved-track collection.
    GetTracks,
    /// Enrich, normalize and summarize the collection.
    AnalyzeTracks,
    /// Cluster the analyzed collection into playlists.
    OrganizeTracks,
    /// Remove previously generated playlists.
    DeletePlaylists,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [
        JobKind::GetTracks,
        JobKind::AnalyzeTracks,
        JobKind::OrganizeTracks,
        JobKind::DeletePlaylists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::GetTracks => "get_tracks",
            JobKind::AnalyzeTracks => "analyze_tracks",
            JobKind::OrganizeTracks => "organize_tracks",
            JobKind::DeletePlaylists => "delete_playlists",
        }
    }

    pub fn parse(value: &str) -> Result<Self, JobError> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| JobError::UnknownJobKind(value.to_string()))
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors surfaced at the job boundary.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Unknown job type: {0}")]
    UnknownJobKind(String),

    #[error("Catalog client unavailable: {0}")]
    ClientUnavailable(#[source] CatalogError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Status store error: {0}")]
    StatusStore(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in JobKind::ALL {
            assert_eq!(JobKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert_eq!(JobKind::OrganizeTracks.to_string(), "organize_tracks");
    }

    #[test]
    fn test_unknown_kind() {
        let err = JobKind::parse("shuffle").unwrap_err();
        assert!(matches!(err, JobError::UnknownJobKind(ref v) if v == "shuffle"));
        assert_eq!(err.to_string(), "Unknown job type: shuffle");
    }
}
