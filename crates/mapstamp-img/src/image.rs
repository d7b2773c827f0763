//! In-place editor over the bytes of an IMG container
//!
//! [`MapImage`] works on anything that derefs to a byte slice: a memory
//! mapped file for real containers, a `Vec<u8>` in tests. Reads need only
//! `Deref`; patches need `DerefMut`. Every fixed-offset access is bounds
//! checked and all checks for an operation run before its first write.

use crate::error::{ImgError, Result};
use crate::fat::{self, FatEntry};
use crate::layout::{
    FAT_NAME_LEN, FAT_NAME_OFFSET, MAP_ID_LEN, MAP_ID_OFFSET, MAP_VALUES_LEN, MAP_VALUES_OFFSET,
    TRE_SIGNATURE, header_start,
};
use crate::observer::{PatchEvent, PatchObserver, TracingObserver};
use crate::report::{IdUpdate, ImageReport, RenameReport};
use mapstamp_checksum::{MapId, VerificationWords, compute};
use std::fmt;
use std::ops::{Deref, DerefMut, Range};

/// Byte-level view of one IMG container
pub struct MapImage<B> {
    data: B,
    observer: Box<dyn PatchObserver>,
}

impl<B> fmt::Debug for MapImage<B>
where
    B: Deref<Target = [u8]>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapImage")
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl<B> MapImage<B>
where
    B: Deref<Target = [u8]>,
{
    /// Wrap container bytes, reporting to a [`TracingObserver`]
    pub fn new(data: B) -> Self {
        Self {
            data,
            observer: Box::new(TracingObserver::new()),
        }
    }

    /// Replace the observer receiving patch events
    pub fn with_observer(mut self, observer: impl PatchObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Container bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Underlying buffer
    pub fn inner(&self) -> &B {
        &self.data
    }

    /// Unwrap the underlying buffer
    pub fn into_inner(self) -> B {
        self.data
    }

    /// `len` bytes at `base + offset`, if they lie inside the data
    fn range(&self, base: usize, offset: usize, len: usize) -> Result<Range<usize>> {
        let start = base.checked_add(offset);
        let end = start
            .and_then(|start| start.checked_add(len))
            .filter(|&end| end <= self.data.len());
        match (start, end) {
            (Some(start), Some(end)) => Ok(start..end),
            _ => Err(ImgError::Truncated {
                offset: base.saturating_add(offset),
                len,
                size: self.data.len(),
            }),
        }
    }

    /// Start of the TRE subfile header
    ///
    /// The first `GARMIN TRE` signature is rounded down to a 256 byte
    /// boundary.
    pub fn locate_header(&self) -> Result<usize> {
        self.data
            .windows(TRE_SIGNATURE.len())
            .position(|w| w == TRE_SIGNATURE)
            .map(header_start)
            .ok_or(ImgError::SignatureNotFound)
    }

    /// Header length byte at the header start
    pub fn header_length(&self, header_start: usize) -> Result<u8> {
        let range = self.range(header_start, 0, 1)?;
        Ok(self.data[range.start])
    }

    /// Map id currently stored in the header
    pub fn stored_map_id(&self, header_start: usize) -> Result<MapId> {
        let range = self.range(header_start, MAP_ID_OFFSET, MAP_ID_LEN)?;
        let mut bytes = [0u8; MAP_ID_LEN];
        bytes.copy_from_slice(&self.data[range]);
        Ok(MapId::from_le_bytes(bytes))
    }

    /// Map values currently stored in the header
    pub fn stored_values(&self, header_start: usize) -> Result<VerificationWords> {
        let range = self.range(header_start, MAP_VALUES_OFFSET, MAP_VALUES_LEN)?;
        let mut bytes = [0u8; MAP_VALUES_LEN];
        bytes.copy_from_slice(&self.data[range]);
        Ok(VerificationWords::from_le_bytes(bytes))
    }

    /// Used FAT entries
    pub fn fat_entries(&self) -> Result<Vec<FatEntry>> {
        fat::entries(&self.data)
    }

    /// Summarise header and FAT without modifying anything
    pub fn inspect(&self) -> Result<ImageReport> {
        let header_start = self.locate_header()?;
        let header_length = self.header_length(header_start)?;
        let map_id = self.stored_map_id(header_start)?;
        let stored_values = self.stored_values(header_start)?;
        let expected_values = compute(map_id, header_length);

        Ok(ImageReport {
            header_start,
            header_length,
            map_id,
            stored_values,
            expected_values,
            checksum_valid: stored_values == expected_values,
            entries: self.fat_entries()?,
        })
    }
}

impl<B> MapImage<B>
where
    B: DerefMut<Target = [u8]>,
{
    /// Write `map_id` and its map values into the header at `header_start`
    ///
    /// FAT names are left alone; see [`MapImage::rename_subfiles`].
    pub fn update_identifier(&mut self, header_start: usize, map_id: MapId) -> Result<IdUpdate> {
        let header_length = self.header_length(header_start)?;
        let id_range = self.range(header_start, MAP_ID_OFFSET, MAP_ID_LEN)?;
        let values_range = self.range(header_start, MAP_VALUES_OFFSET, MAP_VALUES_LEN)?;
        let old_map_id = self.stored_map_id(header_start)?;
        let old_values = self.stored_values(header_start)?;

        self.observer.on_event(&PatchEvent::HeaderLocated {
            start: header_start,
            header_length,
        });

        self.data[id_range].copy_from_slice(&map_id.to_le_bytes());
        self.observer.on_event(&PatchEvent::MapIdReplaced {
            old: old_map_id,
            new: map_id,
        });

        let new_values = compute(map_id, header_length);
        self.data[values_range].copy_from_slice(&new_values.to_le_bytes());
        self.observer.on_event(&PatchEvent::ValuesReplaced {
            stored: old_values,
            computed: new_values,
        });

        Ok(IdUpdate {
            header_start,
            header_length,
            old_map_id,
            new_map_id: map_id,
            old_values,
            new_values,
        })
    }

    /// Locate the header, then write `map_id` and its map values
    pub fn set_map_id(&mut self, map_id: MapId) -> Result<IdUpdate> {
        let header_start = self.locate_header()?;
        self.update_identifier(header_start, map_id)
    }

    /// Name every FAT entry after `map_id`, then update the header to match
    ///
    /// Nothing is written unless the id has an 8 digit name, the header is
    /// found and every touched field lies inside the data.
    pub fn rename_subfiles(&mut self, map_id: MapId) -> Result<RenameReport> {
        let name = map_id.to_name()?;
        let header_start = self.locate_header()?;
        self.range(header_start, MAP_VALUES_OFFSET, MAP_VALUES_LEN)?;
        let offsets = fat::entry_offsets(&self.data)?;

        let previous_name = offsets.first().map(|&pos| fat::name_at(&self.data, pos));
        for &pos in &offsets {
            let old_name = fat::name_at(&self.data, pos);
            let start = pos + FAT_NAME_OFFSET;
            self.data[start..start + FAT_NAME_LEN].copy_from_slice(&name);
            self.observer.on_event(&PatchEvent::EntryRenamed {
                offset: pos,
                old_name,
            });
        }

        let update = self.update_identifier(header_start, map_id)?;
        Ok(RenameReport {
            count: offsets.len(),
            offsets,
            previous_name,
            update,
        })
    }
}
