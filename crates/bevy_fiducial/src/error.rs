//! Error types for the bevy_fiducial plugin
//!
//! Covers marker library loading, session construction, and backend
//! wiring. Per-marker runtime hiccups never surface here; those are
//! logged by the systems and the affected marker simply skips a tick.

use thiserror::Error;

/// The main error type for bevy_fiducial operations
#[derive(Error, Debug)]
pub enum BevyFiducialError {
    /// Marker library file failed to parse
    #[error("Failed to parse marker library '{path}': {reason}")]
    LibraryParse { path: String, reason: String },

    /// A marker library entry is unusable
    #[error("Invalid marker library entry: {0}")]
    LibraryEntry(String),

    /// The tracking session could not be constructed
    #[error("Failed to build tracking session: {0}")]
    SessionBuild(String),

    /// The tracking backend never became available
    #[error("Tracking backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Error bubbled up from the core tracking crate
    #[error("Tracking error: {0}")]
    Tracking(#[from] fiducial::FiducialError),

    /// Generic or miscellaneous error
    #[error("{0}")]
    Other(String),
}

impl BevyFiducialError {
    /// Creates a library parse error with path and reason
    pub fn library_parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        BevyFiducialError::LibraryParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a session build error
    pub fn session_build(reason: impl Into<String>) -> Self {
        BevyFiducialError::SessionBuild(reason.into())
    }
}

impl From<String> for BevyFiducialError {
    fn from(msg: String) -> Self {
        BevyFiducialError::Other(msg)
    }
}

impl From<&str> for BevyFiducialError {
    fn from(msg: &str) -> Self {
        BevyFiducialError::Other(msg.to_string())
    }
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, BevyFiducialError>;
