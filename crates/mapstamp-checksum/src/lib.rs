//! Checksum primitives for Garmin IMG map containers
//!
//! Every TRE subfile of a Garmin map carries its numeric map identifier
//! together with four 32-bit "map values". The device firmware recomputes
//! these values from the identifier and the TRE header length and refuses
//! maps where they disagree. The algorithm is undocumented; the tables and
//! constants here were recovered by reverse engineering and must be kept
//! bit-exact.
//!
//! # Components
//!
//! - **Map identifiers**: [`MapId`], the numeric id plus its 8-digit
//!   subfile name form
//! - **Map values**: [`MapValues`] / [`compute`], the nibble substitution
//!   checksum written next to the identifier
//! - **Fingerprints**: [`content_fingerprint`], an MD5 digest over a
//!   directory tree used to decide whether built maps can be reused
//!
//! # Examples
//!
//! ```
//! use mapstamp_checksum::{MapId, compute};
//!
//! let id: MapId = "00010230".parse().unwrap();
//! let words = compute(id, 188);
//! assert_eq!(words.as_array()[0], 0x27f6_6f74);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod fingerprint;
pub mod map_id;
pub mod values;

pub use error::{ChecksumError, Result};
pub use fingerprint::{Fingerprint, content_fingerprint};
pub use map_id::MapId;
pub use values::{MapValues, VerificationWords, compute};
