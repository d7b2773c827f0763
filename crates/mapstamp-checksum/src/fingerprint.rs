//! Content fingerprints for directory trees
//!
//! A build is only worth repeating when its inputs changed. Inputs such as
//! style directories are summarised into one MD5 digest over the relative
//! path and the contents of every regular file, visited in sorted order, so
//! the digest does not depend on where the directory lives or on the order
//! the filesystem lists it in.

use crate::error::{ChecksumError, Result};
use md5::{Digest, Md5};
use std::fmt;
use std::fs::File;
use std::path::Path;
use walkdir::WalkDir;

/// MD5 digest of a directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parse from a 32 character hex string
    pub fn from_hex(hex: &str) -> std::result::Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Raw bytes
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Fingerprint every regular file below `dir`
///
/// Each file contributes its `/` separated path relative to `dir`, a NUL
/// byte, then its contents. Symlinks are not followed and empty directories
/// do not contribute.
pub fn content_fingerprint(dir: impl AsRef<Path>) -> Result<Fingerprint> {
    let root = dir.as_ref();
    if !root.is_dir() {
        return Err(ChecksumError::NotADirectory(root.to_path_buf()));
    }

    let mut hasher = Md5::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        hasher.update(name.as_bytes());
        hasher.update([0u8]);

        let mut file = File::open(entry.path())?;
        std::io::copy(&mut file, &mut hasher)?;
    }

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hasher.finalize());
    Ok(Fingerprint(bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn populate(dir: &Path) {
        fs::create_dir_all(dir.join("lines")).unwrap();
        fs::write(dir.join("version"), b"1\n").unwrap();
        fs::write(dir.join("lines/roads"), b"highway=primary [0x02]\n").unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let fp = content_fingerprint(dir.path()).unwrap();
        // MD5 of no input
        assert_eq!(fp.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_location_independent() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        populate(a.path());
        populate(&b.path().join("nested/style"));

        let fa = content_fingerprint(a.path()).unwrap();
        let fb = content_fingerprint(b.path().join("nested/style")).unwrap();
        assert_eq!(fa, fb);
    }

    #[test]
    fn test_detects_content_change() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let before = content_fingerprint(dir.path()).unwrap();

        fs::write(dir.path().join("lines/roads"), b"highway=primary [0x03]\n").unwrap();
        let after = content_fingerprint(dir.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_detects_rename() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let before = content_fingerprint(dir.path()).unwrap();

        fs::rename(dir.path().join("version"), dir.path().join("version2")).unwrap();
        let after = content_fingerprint(dir.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            content_fingerprint(file.path()),
            Err(ChecksumError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_hex_round_trip() {
        let fp = Fingerprint::from_bytes([0xab; 16]);
        assert_eq!(Fingerprint::from_hex(&fp.to_hex()).unwrap(), fp);
        assert!(Fingerprint::from_hex("xyz").is_err());
    }
}
