//! Memory-mapped IMG container files
//!
//! Containers are patched through a shared writable mapping so that only the
//! touched pages reach the disk; the file size never changes. Callers must
//! not run two patches against the same path at once.

use crate::error::{ImgError, Result};
use crate::image::MapImage;
use crate::observer::TracingObserver;
use crate::report::{IdUpdate, ImageReport, RenameReport};
use mapstamp_checksum::MapId;
use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::debug;

/// Writable container backed by the file on disk
pub type ImgFile = MapImage<MmapMut>;

/// Read-only container backed by the file on disk
pub type ImgView = MapImage<Mmap>;

fn ensure_not_empty(file: &File, path: &Path) -> Result<u64> {
    let size = file.metadata()?.len();
    if size == 0 {
        return Err(ImgError::EmptyFile(path.to_path_buf()));
    }
    Ok(size)
}

/// Map `path` read-only
pub fn open(path: impl AsRef<Path>) -> Result<ImgView> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let size = ensure_not_empty(&file, path)?;
    debug!("Mapping {} ({size} bytes) read-only", path.display());

    #[allow(unsafe_code)]
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    Ok(MapImage::new(mmap).with_observer(TracingObserver::labelled(path.display().to_string())))
}

/// Map `path` for in-place patching
pub fn open_mut(path: impl AsRef<Path>) -> Result<ImgFile> {
    let path = path.as_ref();
    let file = OpenOptions::new().read(true).write(true).open(path)?;
    let size = ensure_not_empty(&file, path)?;
    debug!("Mapping {} ({size} bytes) for writing", path.display());

    #[allow(unsafe_code)]
    let mmap = unsafe { MmapOptions::new().map_mut(&file)? };
    Ok(MapImage::new(mmap).with_observer(TracingObserver::labelled(path.display().to_string())))
}

impl MapImage<MmapMut> {
    /// Write modified pages back to the file
    pub fn flush(&self) -> Result<()> {
        self.inner().flush()?;
        Ok(())
    }
}

/// Summarise the container at `path`
pub fn inspect(path: impl AsRef<Path>) -> Result<ImageReport> {
    open(path)?.inspect()
}

/// Replace the map id and map values of the container at `path`
pub fn set_map_id(path: impl AsRef<Path>, map_id: MapId) -> Result<IdUpdate> {
    let mut image = open_mut(path)?;
    let update = image.set_map_id(map_id)?;
    image.flush()?;
    Ok(update)
}

/// Rename all subfiles of the container at `path` to `map_id`
pub fn rename(path: impl AsRef<Path>, map_id: MapId) -> Result<RenameReport> {
    let mut image = open_mut(path)?;
    let report = image.rename_subfiles(map_id)?;
    image.flush()?;
    Ok(report)
}
