//! Moving built containers into a map slot
//!
//! Each source map gets a slot number when a batch is built. The splitter
//! names its tiles `<slot:4><tile:4>.img`, so a container built for one slot
//! can be reused for another by swapping the first four digits: in the map
//! id, in the FAT names and in the file name.

use crate::error::{ImgError, Result};
use crate::file;
use crate::report::RestampReport;
use mapstamp_checksum::MapId;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Largest slot number
pub const MAX_SLOT: u32 = 9999;

#[allow(clippy::expect_used)]
static TILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)([0-9]{4})([0-9]{4})\.img$").expect("valid tile name pattern")
});

/// A container file name split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileName {
    /// Text before the 8 digits
    pub prefix: String,
    /// Slot digits
    pub slot: String,
    /// Tile digits
    pub tile: String,
}

impl TileName {
    /// Split a file name; `None` unless it ends in 8 digits and `.img`
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = TILE_NAME.captures(file_name)?;
        Some(Self {
            prefix: caps[1].to_string(),
            slot: caps[2].to_string(),
            tile: caps[3].to_string(),
        })
    }

    /// Map id spelled by the 8 digits
    pub fn map_id(&self) -> Result<MapId> {
        Ok(format!("{}{}", self.slot, self.tile).parse::<MapId>()?)
    }

    /// Same tile in another slot
    pub fn with_slot(&self, slot: u32) -> Result<Self> {
        if slot > MAX_SLOT {
            return Err(ImgError::InvalidSlot(slot));
        }
        Ok(Self {
            prefix: self.prefix.clone(),
            slot: format!("{slot:04}"),
            tile: self.tile.clone(),
        })
    }

    /// File name for these parts
    pub fn file_name(&self) -> String {
        format!("{}{}{}.img", self.prefix, self.slot, self.tile)
    }
}

/// Move the container at `path` into `slot`
///
/// Returns `Ok(None)` when the file name does not follow the tile naming
/// scheme; such files are left alone. Otherwise the container is renamed to
/// the new map id and the file is moved next to its old location. An
/// existing file at the new location is never replaced; the container is
/// left untouched and [`ImgError::TargetExists`] is returned.
pub fn restamp(path: impl AsRef<Path>, slot: u32) -> Result<Option<RestampReport>> {
    let path = path.as_ref();
    let Some(name) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(TileName::parse)
    else {
        debug!("Skipping {}: not a tile file name", path.display());
        return Ok(None);
    };

    let target = name.with_slot(slot)?;
    let old_map_id = name.map_id()?;
    let new_map_id = target.map_id()?;

    let new_path: PathBuf = path.with_file_name(target.file_name());
    if new_path != path && new_path.exists() {
        return Err(ImgError::TargetExists(new_path));
    }

    let rename = file::rename(path, new_map_id)?;
    info!(
        "Replaced map id {} with {new_map_id} in {} FAT entries of {}",
        rename.previous_name.as_deref().unwrap_or("-"),
        rename.count,
        path.display()
    );

    if new_path != path {
        std::fs::rename(path, &new_path)?;
        info!("Moved {} to {}", path.display(), new_path.display());
    }

    Ok(Some(RestampReport {
        old_path: path.to_path_buf(),
        new_path,
        old_map_id,
        new_map_id,
        rename,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tile_name() {
        let name = TileName::parse("63240001.img").unwrap();
        assert_eq!(name.prefix, "");
        assert_eq!(name.slot, "6324");
        assert_eq!(name.tile, "0001");
        assert_eq!(name.map_id().unwrap(), MapId::new(63_240_001));

        let name = TileName::parse("map_123400020003.img").unwrap();
        assert_eq!(name.prefix, "map_1234");
        assert_eq!(name.slot, "0002");
        assert_eq!(name.tile, "0003");
    }

    #[test]
    fn test_parse_rejects_other_names() {
        for bad in ["gmapsupp.img", "1234567.img", "63240001.IMG", "63240001.img.bak"] {
            assert_eq!(TileName::parse(bad), None, "{bad}");
        }
    }

    #[test]
    fn test_parse_requires_ascii_digits() {
        assert_eq!(TileName::parse("\u{661}\u{662}\u{663}\u{664}0230.img"), None);
        assert_eq!(TileName::parse("0001\u{660}\u{662}\u{663}\u{660}.img"), None);
    }

    #[test]
    fn test_restamp_skips_non_ascii_digits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("\u{661}\u{662}\u{663}\u{664}0230.img");
        std::fs::write(&path, b"not touched").unwrap();
        assert_eq!(restamp(&path, 1).unwrap(), None);
        assert_eq!(std::fs::read(&path).unwrap(), b"not touched");
    }

    #[test]
    fn test_with_slot() {
        let name = TileName::parse("00010230.img").unwrap();
        let moved = name.with_slot(7).unwrap();
        assert_eq!(moved.file_name(), "00070230.img");
        assert_eq!(moved.map_id().unwrap(), MapId::new(70230));
        assert!(matches!(
            name.with_slot(10_000),
            Err(ImgError::InvalidSlot(10_000))
        ));
    }

    #[test]
    fn test_restamp_skips_foreign_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gmapsupp.img");
        std::fs::write(&path, b"not touched").unwrap();
        assert_eq!(restamp(&path, 1).unwrap(), None);
        assert_eq!(std::fs::read(&path).unwrap(), b"not touched");
    }
}
