//! Results of patch and inspection operations

use crate::fat::FatEntry;
use mapstamp_checksum::{MapId, VerificationWords};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of replacing the map id in the TRE header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdUpdate {
    /// TRE header start
    pub header_start: usize,
    /// Header length byte used for the map values
    pub header_length: u8,
    /// Map id found in the header
    pub old_map_id: MapId,
    /// Map id written
    pub new_map_id: MapId,
    /// Map values found in the header
    pub old_values: VerificationWords,
    /// Map values written
    pub new_values: VerificationWords,
}

/// Outcome of a full rename (FAT names plus TRE header)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    /// Number of FAT entries rewritten
    pub count: usize,
    /// Absolute offsets of the rewritten entries
    pub offsets: Vec<usize>,
    /// Name stored in the first entry before the rename
    pub previous_name: Option<String>,
    /// Header update performed after the FAT
    pub update: IdUpdate,
}

/// Read-only summary of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReport {
    /// TRE header start
    pub header_start: usize,
    /// Header length byte
    pub header_length: u8,
    /// Map id stored in the header
    pub map_id: MapId,
    /// Map values stored in the header
    pub stored_values: VerificationWords,
    /// Map values expected for the stored map id
    pub expected_values: VerificationWords,
    /// Whether stored and expected values agree
    pub checksum_valid: bool,
    /// Used FAT entries
    pub entries: Vec<FatEntry>,
}

impl ImageReport {
    /// Whether every FAT entry is named after the stored map id
    pub fn names_match_map_id(&self) -> bool {
        let expected = self.map_id.to_string();
        self.entries.iter().all(|e| e.name == expected)
    }
}

/// Outcome of moving a container into a new slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestampReport {
    /// Path before the move
    pub old_path: PathBuf,
    /// Path after the move
    pub new_path: PathBuf,
    /// Map id implied by the old file name
    pub old_map_id: MapId,
    /// Map id written
    pub new_map_id: MapId,
    /// Container patch details
    pub rename: RenameReport,
}
