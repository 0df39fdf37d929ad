use nearby_core::LocationError;
use nearby_places::PlacesError;
use thiserror::Error;

use crate::pipeline::SearchPhase;

/// Failures of the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for key {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid store key \"{0}\"")]
    InvalidKey(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Hard failures surfaced by [`crate::DiscoveryPipeline`].
///
/// Detail-fetch failures never appear here; the enricher absorbs them.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("could not determine location: {0}")]
    Location(#[from] LocationError),

    #[error("place search failed: {0}")]
    Search(#[from] PlacesError),

    #[error("saved places unavailable: {0}")]
    Persistence(#[from] StoreError),

    #[error("search run {generation} was superseded by a newer search")]
    Superseded { generation: u64, phase: SearchPhase },
}

impl DiscoveryError {
    /// The search phase a run was in when it aborted with this error.
    ///
    /// `None` for errors that do not come from a search run.
    #[must_use]
    pub fn phase(&self) -> Option<SearchPhase> {
        match self {
            DiscoveryError::Location(_) => Some(SearchPhase::LocatingUser),
            DiscoveryError::Search(_) => Some(SearchPhase::Searching),
            DiscoveryError::Superseded { phase, .. } => Some(*phase),
            DiscoveryError::Persistence(_) => None,
        }
    }
}
