//! Map identifiers
//!
//! A map identifier appears in two forms inside an IMG container:
//!
//! - as a little-endian `u32` in the TRE header, whose hexadecimal nibbles
//!   feed the map values checksum
//! - as the 8 character zero padded decimal base name of every subfile in
//!   the FAT (`00010230.TRE`, `00010230.RGN`, ...)

use crate::error::{ChecksumError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a subfile base name in the FAT
pub const NAME_LEN: usize = 8;

/// Numeric Garmin map identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MapId(u32);

impl MapId {
    /// Largest identifier whose decimal form fits into a subfile name
    pub const MAX_NAMEABLE: u32 = 99_999_999;

    /// Wrap a raw identifier value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw identifier value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Nibble `i` of the identifier, 0 being the most significant four bits
    ///
    /// `i` must be in `0..8`.
    pub const fn nibble(self, i: usize) -> u32 {
        (self.0 >> (4 * (7 - i))) & 0xf
    }

    /// Whether the decimal form fits into a subfile name
    pub const fn is_nameable(self) -> bool {
        self.0 <= Self::MAX_NAMEABLE
    }

    /// Zero padded decimal subfile name (`10230` -> `b"00010230"`)
    pub fn to_name(self) -> Result<[u8; NAME_LEN]> {
        if !self.is_nameable() {
            return Err(ChecksumError::MapIdTooLong(self.0));
        }
        let text = format!("{:08}", self.0);
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(text.as_bytes());
        Ok(name)
    }

    /// On-disk encoding used in the TRE header
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode the on-disk TRE header encoding
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }
}

impl From<u32> for MapId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<MapId> for u32 {
    fn from(id: MapId) -> Self {
        id.0
    }
}

impl FromStr for MapId {
    type Err = ChecksumError;

    /// Parse decimal identifier text.
    ///
    /// Leading zeros count towards the 8 character limit, so `"000010230"`
    /// is rejected even though its value would fit.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.is_empty() || text.len() > NAME_LEN || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ChecksumError::InvalidMapId(s.to_string()));
        }
        text.parse::<u32>()
            .map(Self)
            .map_err(|_| ChecksumError::InvalidMapId(s.to_string()))
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pads_short_text() {
        let id: MapId = "1".parse().expect("should parse");
        assert_eq!(id.get(), 1);
        assert_eq!(&id.to_name().unwrap(), b"00000001");
        assert_eq!(id.to_string(), "00000001");
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        for bad in ["", "   ", "12a", "-1", "123456789", "000010230", "0x10"] {
            assert!(
                matches!(bad.parse::<MapId>(), Err(ChecksumError::InvalidMapId(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: MapId = " 63240001\n".parse().unwrap();
        assert_eq!(id.get(), 63_240_001);
    }

    #[test]
    fn test_nibbles_are_hex_digits_of_value() {
        // 10230 == 0x000027f6
        let id = MapId::new(10230);
        let nibbles: Vec<u32> = (0..8).map(|i| id.nibble(i)).collect();
        assert_eq!(nibbles, vec![0, 0, 0, 0, 2, 7, 15, 6]);
    }

    #[test]
    fn test_name_rejects_nine_digits() {
        let id = MapId::new(100_000_000);
        assert!(!id.is_nameable());
        assert!(matches!(
            id.to_name(),
            Err(ChecksumError::MapIdTooLong(100_000_000))
        ));
        assert!(MapId::new(MapId::MAX_NAMEABLE).to_name().is_ok());
    }

    #[test]
    fn test_le_bytes() {
        let id = MapId::new(0x0000_27f6);
        assert_eq!(id.to_le_bytes(), [0xf6, 0x27, 0x00, 0x00]);
        assert_eq!(MapId::from_le_bytes([0xf6, 0x27, 0x00, 0x00]), id);
    }
}
