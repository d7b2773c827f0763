//! File Allocation Table of an IMG container
//!
//! The FAT is an array of fixed size entries starting at [`FAT_START`]. Each
//! used entry names one subfile (`00010230` + `TRE`) and records its size;
//! the block list that follows in the entry is not needed here. The table
//! ends at the first entry whose first byte is zero.

use crate::error::{ImgError, Result};
use crate::layout::{
    FAT_END_MARKER, FAT_ENTRY_HEADER_LEN, FAT_ENTRY_SIZE, FAT_NAME_LEN, FAT_NAME_OFFSET, FAT_START,
};
use binrw::BinRead;
use serde::Serialize;
use std::io::Cursor;
use tracing::warn;

/// Leading fields of a FAT entry as stored on disk
#[derive(BinRead, Debug)]
#[br(little)]
struct RawFatEntry {
    flag: u8,
    name: [u8; FAT_NAME_LEN],
    kind: [u8; 3],
    size: u32,
    part: u16,
}

/// Decoded FAT entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FatEntry {
    /// Absolute offset of the entry
    pub offset: usize,
    /// First byte (non-zero for used entries)
    pub flag: u8,
    /// Subfile base name, normally the 8 digit map id
    pub name: String,
    /// Subfile type (`TRE`, `RGN`, `LBL`, ...)
    pub kind: String,
    /// Subfile size in bytes
    pub size: u32,
    /// Part number for subfiles spanning several entries
    pub part: u16,
}

impl FatEntry {
    /// Decode the entry at `offset`
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let bytes = offset
            .checked_add(FAT_ENTRY_HEADER_LEN)
            .and_then(|end| data.get(offset..end))
            .ok_or(ImgError::Truncated {
                offset,
                len: FAT_ENTRY_HEADER_LEN,
                size: data.len(),
            })?;
        let raw = RawFatEntry::read(&mut Cursor::new(bytes))?;
        Ok(Self {
            offset,
            flag: raw.flag,
            name: text(&raw.name),
            kind: text(&raw.kind),
            size: raw.size,
            part: raw.part,
        })
    }

    /// `NAME.TYPE` form of the subfile name
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind)
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches([' ', '\0'])
        .to_string()
}

/// Offsets of all used FAT entries
///
/// Every returned entry has its name field within `data`. Data ending
/// before the end marker also ends the table.
pub fn entry_offsets(data: &[u8]) -> Result<Vec<usize>> {
    if data.len() <= FAT_START {
        return Err(ImgError::Truncated {
            offset: FAT_START,
            len: 1,
            size: data.len(),
        });
    }

    let mut offsets = Vec::new();
    let mut pos = FAT_START;
    loop {
        let Some(&flag) = data.get(pos) else {
            warn!("FAT runs to the end of the data at {pos:#x} without an end marker");
            break;
        };
        if flag == FAT_END_MARKER {
            break;
        }

        let name_start = pos + FAT_NAME_OFFSET;
        if name_start + FAT_NAME_LEN > data.len() {
            return Err(ImgError::Truncated {
                offset: name_start,
                len: FAT_NAME_LEN,
                size: data.len(),
            });
        }
        offsets.push(pos);
        pos += FAT_ENTRY_SIZE;
    }
    Ok(offsets)
}

/// Decode all used FAT entries
pub fn entries(data: &[u8]) -> Result<Vec<FatEntry>> {
    entry_offsets(data)?
        .into_iter()
        .map(|offset| FatEntry::parse(data, offset))
        .collect()
}

/// Base name stored in the entry at `offset`
pub(crate) fn name_at(data: &[u8], offset: usize) -> String {
    offset
        .checked_add(FAT_NAME_OFFSET)
        .and_then(|start| data.get(start..start.checked_add(FAT_NAME_LEN)?))
        .map(text)
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(data: &mut [u8], index: usize, name: &[u8; 8], kind: &[u8; 3], size: u32) {
        let pos = FAT_START + index * FAT_ENTRY_SIZE;
        data[pos] = 0x01;
        data[pos + 1..pos + 9].copy_from_slice(name);
        data[pos + 9..pos + 12].copy_from_slice(kind);
        data[pos + 12..pos + 16].copy_from_slice(&size.to_le_bytes());
    }

    #[test]
    fn test_parse_rejects_offsets_past_the_end() {
        let data = vec![0u8; FAT_START + FAT_ENTRY_SIZE];
        for offset in [usize::MAX, usize::MAX - 4, data.len() - 4] {
            assert!(matches!(
                FatEntry::parse(&data, offset),
                Err(ImgError::Truncated { .. })
            ));
            assert_eq!(name_at(&data, offset), "");
        }
    }

    #[test]
    fn test_entries_stop_at_end_marker() {
        let mut data = vec![0u8; FAT_START + 4 * FAT_ENTRY_SIZE];
        entry(&mut data, 0, b"00010230", b"TRE", 0x1234);
        entry(&mut data, 1, b"00010230", b"RGN", 0x10_0000);
        // entry 2 stays zeroed, entry 3 is garbage after the end
        entry(&mut data, 3, b"99999999", b"LBL", 1);

        let list = entries(&data).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].offset, FAT_START);
        assert_eq!(list[0].file_name(), "00010230.TRE");
        assert_eq!(list[0].size, 0x1234);
        assert_eq!(list[1].offset, FAT_START + FAT_ENTRY_SIZE);
        assert_eq!(list[1].kind, "RGN");
        assert_eq!(list[1].part, 0);
    }

    #[test]
    fn test_table_ending_at_data_end() {
        let mut data = vec![0u8; FAT_START + 2 * FAT_ENTRY_SIZE];
        entry(&mut data, 0, b"00000001", b"TRE", 1);
        entry(&mut data, 1, b"00000001", b"RGN", 1);
        assert_eq!(
            entry_offsets(&data).unwrap(),
            vec![FAT_START, FAT_START + FAT_ENTRY_SIZE]
        );
    }

    #[test]
    fn test_cut_off_name_is_truncated() {
        let mut data = vec![0u8; FAT_START + 4];
        data[FAT_START] = 0x01;
        assert!(matches!(
            entry_offsets(&data),
            Err(ImgError::Truncated { offset, .. }) if offset == FAT_START + 1
        ));
    }

    #[test]
    fn test_missing_fat_is_truncated() {
        let data = vec![0u8; 0x200];
        assert!(matches!(
            entry_offsets(&data),
            Err(ImgError::Truncated { offset: FAT_START, .. })
        ));
    }

    #[test]
    fn test_name_trims_padding() {
        let mut data = vec![0u8; FAT_START + FAT_ENTRY_SIZE];
        entry(&mut data, 0, b"MAKEGMAP", b"MPS", 0);
        data[FAT_START + 5..FAT_START + 9].copy_from_slice(b"    ");
        assert_eq!(name_at(&data, FAT_START), "MAKE");
    }
}
