use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Why the user's position could not be determined.
///
/// These are hard failures for a search run; nothing retries them
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    PositionUnavailable(String),

    #[error("location request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}
