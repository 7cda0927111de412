//! Error types for marker tracking and content lifecycle operations

/// Error type for tracking session operations
///
/// Only unrecoverable, caller-facing failures live here. Per-marker
/// conditions that a tick must survive (a spawn factory declining, a stale
/// handle) are reported as values such as [`SpawnOutcome`] and
/// [`GuardReport`] instead, so one bad marker can never abort a tick.
///
/// [`SpawnOutcome`]: crate::pool::SpawnOutcome
/// [`GuardReport`]: crate::session::GuardReport
#[derive(thiserror::Error, Debug)]
pub enum FiducialError {
    /// A marker descriptor carried an empty or otherwise unusable id
    #[error("Invalid marker id: {0}")]
    InvalidMarkerId(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Operation attempted on a session that has already been shut down
    #[error("Session already shut down: {0}")]
    SessionClosed(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for FiducialError {
    fn from(s: String) -> Self {
        FiducialError::Other(s)
    }
}

impl From<&str> for FiducialError {
    fn from(s: &str) -> Self {
        FiducialError::Other(s.to_string())
    }
}

/// Result type for tracking operations
pub type Result<T> = std::result::Result<T, FiducialError>;
