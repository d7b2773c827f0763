//! `restamp`: move tile files into another slot

use crate::commands::patch::render_rename;
use crate::error::batch_result;
use crate::output::{OutputFormat, emit};
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, warn};

/// Restamp every file, continuing past failures
pub fn handle<W: Write>(
    slot: u32,
    files: &[PathBuf],
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut failed = 0;
    for path in files {
        match mapstamp_img::restamp(path, slot) {
            Ok(Some(report)) => emit(out, format, &report, || {
                format!(
                    "{} -> {}\n{}",
                    report.old_path.display(),
                    report.new_path.display(),
                    render_rename(&report.new_path, &report.rename)
                )
            })?,
            Ok(None) => warn!("Skipping {}: not named <slot><tile>.img", path.display()),
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }
    Ok(batch_result(failed, files.len())?)
}
