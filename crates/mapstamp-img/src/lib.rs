//! In-place patching of Garmin IMG map containers
//!
//! A Garmin `.img` container bundles the subfiles of one or more maps (TRE,
//! RGN, LBL, ...) behind a File Allocation Table. Devices identify a map by
//! the numeric id in its TRE header, guarded by four "map values", and by
//! the 8 digit base name of its subfiles. This crate rewrites those fields so
//! a container built under one id can be published under another.
//!
//! # Operations
//!
//! - [`MapImage::locate_header`]: find the TRE header by its signature
//! - [`MapImage::update_identifier`]: write a map id and its map values
//! - [`MapImage::rename_subfiles`]: rename every FAT entry, then update the
//!   header to match
//! - [`MapImage::inspect`]: report the stored id, values and FAT listing
//! - [`restamp`]: move a tile file into another map slot
//!
//! # Example
//!
//! ```no_run
//! use mapstamp_img::{MapId, open_mut};
//!
//! # fn main() -> Result<(), mapstamp_img::ImgError> {
//! let mut image = open_mut("63240001.img")?;
//! let report = image.rename_subfiles(MapId::new(63_250_001))?;
//! image.flush()?;
//! println!("{} entries renamed (was {:?})", report.count, report.previous_name);
//! # Ok(())
//! # }
//! ```
//!
//! Patches are not journalled. An interrupted rename leaves the container in
//! an inconsistent state; re-run it from a known good copy.

#![warn(missing_docs)]

pub mod error;
pub mod fat;
pub mod file;
pub mod image;
pub mod layout;
pub mod observer;
pub mod report;
pub mod slot;

pub use error::{ImgError, Result};
pub use fat::FatEntry;
pub use file::{ImgFile, ImgView, inspect, open, open_mut, rename, set_map_id};
pub use image::MapImage;
pub use observer::{NullObserver, PatchEvent, PatchObserver, TracingObserver};
pub use report::{IdUpdate, ImageReport, RenameReport, RestampReport};
pub use slot::{TileName, restamp};

// Re-export the checksum types used in this crate's API
pub use mapstamp_checksum::{MapId, VerificationWords};
