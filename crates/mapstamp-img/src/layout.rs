//! Fixed offsets and sizes of the parts of an IMG container that get patched
//!
//! The TRE subfile header is found by its signature; all TRE offsets are
//! relative to the header start. The FAT lives at a fixed absolute offset.

/// Signature inside every TRE subfile header
pub const TRE_SIGNATURE: &[u8] = b"GARMIN TRE";

/// Headers start on a 256 byte boundary; the signature sits a few bytes in
pub const HEADER_ALIGN_MASK: usize = !0xff;

/// Map id (u32 LE) relative to the TRE header start
pub const MAP_ID_OFFSET: usize = 0x74;

/// Size of the stored map id
pub const MAP_ID_LEN: usize = 4;

/// Four map values (u32 LE each) relative to the TRE header start
pub const MAP_VALUES_OFFSET: usize = 0x9a;

/// Size of the stored map values
pub const MAP_VALUES_LEN: usize = 16;

/// Absolute offset of the first FAT entry
pub const FAT_START: usize = 0x600;

/// Size of one FAT entry
pub const FAT_ENTRY_SIZE: usize = 0x200;

/// Subfile base name relative to the entry start
pub const FAT_NAME_OFFSET: usize = 1;

/// Length of the subfile base name
pub const FAT_NAME_LEN: usize = 8;

/// Bytes of an entry decoded for listings (flag, name, type, size, part)
pub const FAT_ENTRY_HEADER_LEN: usize = 18;

/// First byte of the entry following the last used one
pub const FAT_END_MARKER: u8 = 0x00;

/// Start of the header owning a signature found at `signature_pos`
pub const fn header_start(signature_pos: usize) -> usize {
    signature_pos & HEADER_ALIGN_MASK
}
