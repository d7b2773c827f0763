//! Error types for identifier handling and fingerprinting

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by this crate
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// Identifier text is empty, not decimal, or longer than 8 characters
    #[error("Invalid map id '{0}': needs to be at most 8 decimal digits")]
    InvalidMapId(String),

    /// Identifier value needs more than 8 decimal digits
    #[error("Map id {0} does not fit into an 8 character subfile name")]
    MapIdTooLong(u32),

    /// Fingerprint source is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Directory traversal failed
    #[error("Failed to walk {path}: {message}")]
    Walk {
        /// Path the walker was visiting, if known
        path: String,
        /// Underlying walker message
        message: String,
    },

    /// IO error while reading fingerprinted files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for ChecksumError {
    fn from(e: walkdir::Error) -> Self {
        Self::Walk {
            path: e
                .path()
                .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string()),
            message: e.to_string(),
        }
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, ChecksumError>;
