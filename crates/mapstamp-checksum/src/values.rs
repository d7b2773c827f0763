//! Map values: the checksum stored next to the map id in the TRE header
//!
//! The TRE header holds four 32-bit values derived from the map id and the
//! header length. Each value is handled as eight nibble accumulators
//! (index 0 is the most significant nibble). Accumulators are plain sums and
//! are only cut down to four bits when a value is packed; packing without the
//! per-nibble mask would carry into the neighbouring nibble.
//!
//! Values are computed in the order third, fourth, first, second because the
//! first and second are built from the third. A common offset is added to
//! every nibble at the end.

use crate::map_id::MapId;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Translates map id nibbles into third value nibbles
pub const MAP_ID_CODE_TABLE: [u32; 16] = [
    0x0, 0x1, 0xf, 0x5, //
    0xd, 0x4, 0x7, 0x6, //
    0xb, 0x9, 0xe, 0x8, //
    0x2, 0xa, 0xc, 0x3,
];

/// Offset added to every nibble, indexed by the sum of the odd map id nibbles
pub const OFFSET_MAP: [u32; 16] = [
    6, 7, 5, 11, //
    3, 10, 13, 12, //
    1, 15, 4, 14, //
    8, 0, 2, 9,
];

/// Extra amount on the last nibble of the first value.
///
/// Always one in every map inspected so far; where it comes from in the
/// header is unknown.
const FIRST_VALUE_TAIL: u32 = 1;

/// Number of map values in a TRE header
pub const VALUE_COUNT: usize = 4;

/// Nibbles per value
const NIBBLES: usize = 8;

type Accumulators = [u32; NIBBLES];

/// Calculator for the four map values of one map id and header length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapValues {
    map_id: MapId,
    header_length: u8,
    values: [Accumulators; VALUE_COUNT],
}

impl MapValues {
    /// Run the full calculation
    pub fn calculate(map_id: MapId, header_length: u8) -> Self {
        let mut mv = Self {
            map_id,
            header_length,
            values: [[0; NIBBLES]; VALUE_COUNT],
        };
        mv.calc_third();
        mv.calc_fourth();
        mv.calc_first();
        mv.calc_second();
        mv.add_offset();
        mv
    }

    /// Map id the values were calculated for
    pub const fn map_id(&self) -> MapId {
        self.map_id
    }

    /// Header length the values were calculated for
    pub const fn header_length(&self) -> u8 {
        self.header_length
    }

    /// Packed value `n` (0..4)
    pub fn value(&self, n: usize) -> u32 {
        pack(&self.values[n])
    }

    /// All four packed values
    pub fn words(&self) -> VerificationWords {
        VerificationWords([self.value(0), self.value(1), self.value(2), self.value(3)])
    }

    /// Table substitution of every map id nibble, with neighbouring nibbles
    /// swapped (0<->1, 2<->3, ...).
    fn calc_third(&mut self) {
        let id = self.map_id;
        let out = &mut self.values[2];
        for i in 0..NIBBLES {
            out[i ^ 1] = MAP_ID_CODE_TABLE[id.nibble(i) as usize];
        }
    }

    fn calc_fourth(&mut self) {
        self.values[3] = self.values[2];
    }

    /// Low half of the map id added to the third value, rest copied.
    fn calc_first(&mut self) {
        let id = self.map_id;
        let v3 = self.values[3];
        let out = &mut self.values[0];

        for i in 0..4 {
            out[i] = id.nibble(4 + i) + v3[i];
        }
        out[4] = v3[4];
        out[5] = v3[5];
        out[6] = v3[6];
        out[7] = v3[7] + FIRST_VALUE_TAIL;
    }

    /// Third value with the header length mixed into nibbles 2 and 3 and the
    /// high half of the map id added to nibbles 4..8.
    fn calc_second(&mut self) {
        let id = self.map_id;
        let v3 = self.values[3];
        let length = u32::from(self.header_length);
        let out = &mut self.values[1];

        out[0] = v3[0];
        out[1] = v3[1];
        out[2] = (v3[2] + (length >> 4)) & 0xf;
        out[3] = (v3[3] + length) & 0xf;
        for i in 0..4 {
            out[4 + i] = v3[4 + i] + id.nibble(i);
        }
    }

    fn add_offset(&mut self) {
        let id = self.map_id;
        let n = id.nibble(1) + id.nibble(3) + id.nibble(5) + id.nibble(7);
        let offset = OFFSET_MAP[(n & 0xf) as usize];
        for value in &mut self.values {
            for nibble in value.iter_mut() {
                *nibble += offset;
            }
        }
    }
}

/// Pack accumulators most significant nibble first, masking each to 4 bits
fn pack(nibbles: &Accumulators) -> u32 {
    nibbles
        .iter()
        .enumerate()
        .fold(0, |acc, (i, n)| acc | ((n & 0xf) << (4 * (7 - i))))
}

/// Compute the four map values for `map_id` in a TRE header of
/// `header_length` bytes
pub fn compute(map_id: MapId, header_length: u8) -> VerificationWords {
    MapValues::calculate(map_id, header_length).words()
}

/// The four packed map values as stored in a TRE header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct VerificationWords([u32; VALUE_COUNT]);

impl VerificationWords {
    /// Size of the on-disk encoding
    pub const ENCODED_LEN: usize = 4 * VALUE_COUNT;

    /// Wrap raw values
    pub const fn new(words: [u32; VALUE_COUNT]) -> Self {
        Self(words)
    }

    /// Raw values
    pub const fn as_array(&self) -> &[u32; VALUE_COUNT] {
        &self.0
    }

    /// Each value little-endian, in order
    pub fn to_le_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Decode the on-disk encoding
    pub fn from_le_bytes(bytes: [u8; Self::ENCODED_LEN]) -> Self {
        let mut words = [0u32; VALUE_COUNT];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }
}

impl fmt::Display for VerificationWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x} {:08x} {:08x} {:08x}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
