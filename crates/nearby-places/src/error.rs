use thiserror::Error;

/// Errors returned by the Places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a status other than `OK` / `ZERO_RESULTS`.
    #[error("Places API returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PlacesError {
    /// Provider status string, if this error came from the API envelope.
    #[must_use]
    pub fn provider_status(&self) -> Option<&str> {
        match self {
            PlacesError::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}
