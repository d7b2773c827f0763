//! Error types for IMG container editing

use mapstamp_checksum::ChecksumError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or patching an IMG container
///
/// `SignatureNotFound`, `Truncated` and `EmptyFile` mean the input is not a
/// usable container; retrying cannot help. `InvalidMapId`, `InvalidSlot`
/// and `TargetExists` are raised before anything is written. `Io` may leave
/// a partially patched file behind.
#[derive(Debug, Error)]
pub enum ImgError {
    /// No `GARMIN TRE` signature anywhere in the data
    #[error("TRE subfile signature not found; not a Garmin IMG container")]
    SignatureNotFound,

    /// A fixed-offset field lies beyond the end of the data
    #[error("Truncated container: {len} bytes at offset {offset:#x} exceed size {size:#x}")]
    Truncated {
        /// Start of the field
        offset: usize,
        /// Length of the field
        len: usize,
        /// Size of the data
        size: usize,
    },

    /// Zero-length file
    #[error("Empty file: {}", .0.display())]
    EmptyFile(PathBuf),

    /// Map id cannot be used as a subfile name
    #[error("Invalid map id: {0}")]
    InvalidMapId(#[from] ChecksumError),

    /// Slot number does not fit into four digits
    #[error("Invalid slot {0}: needs to be at most 4 digits")]
    InvalidSlot(u32),

    /// Restamp target already exists
    #[error("Target file already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// FAT entry decoding error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImgError {
    /// Whether the error means the input is not a usable container
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::SignatureNotFound | Self::Truncated { .. } | Self::EmptyFile(_) | Self::BinRead(_)
        )
    }
}

impl From<binrw::Error> for ImgError {
    fn from(e: binrw::Error) -> Self {
        Self::BinRead(e.to_string())
    }
}

/// Result type alias for IMG operations
pub type Result<T> = std::result::Result<T, ImgError>;
