//! `fingerprint`: content hash of a directory tree

use crate::output::{OutputFormat, emit};
use anyhow::Context;
use mapstamp_checksum::content_fingerprint;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct FingerprintOutput<'a> {
    path: &'a Path,
    md5: String,
}

/// Print the fingerprint of `dir`
pub fn handle<W: Write>(dir: &Path, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    let fingerprint = content_fingerprint(dir)
        .with_context(|| format!("failed to fingerprint {}", dir.display()))?;
    let output = FingerprintOutput {
        path: dir,
        md5: fingerprint.to_hex(),
    };
    emit(out, format, &output, || {
        format!("{}  {}", output.md5, dir.display())
    })
}
