//! `show`: read-only summary of containers

use crate::error::batch_result;
use crate::output::{OutputFormat, emit, key_value};
use mapstamp_img::ImageReport;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Serialize)]
struct Shown<'a> {
    path: &'a Path,
    #[serde(flatten)]
    report: &'a ImageReport,
}

/// Inspect every file, continuing past failures
pub fn handle<W: Write>(files: &[PathBuf], format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    let mut failed = 0;
    for path in files {
        match mapstamp_img::inspect(path) {
            Ok(report) => {
                let shown = Shown {
                    path,
                    report: &report,
                };
                emit(out, format, &shown, || render(path, &report))?;
            }
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }
    Ok(batch_result(failed, files.len())?)
}

fn render(path: &Path, report: &ImageReport) -> String {
    let mut text = format!("{}\n", path.display());
    let lines = [
        key_value("header start", format!("{:#x}", report.header_start)),
        key_value("header length", report.header_length),
        key_value("map id", report.map_id),
        key_value("stored values", report.stored_values),
        key_value("expected values", report.expected_values),
        key_value(
            "checksum",
            if report.checksum_valid { "valid" } else { "MISMATCH" },
        ),
        key_value("fat entries", report.entries.len()),
    ];
    for line in lines {
        text.push_str(&line);
        text.push('\n');
    }
    for entry in &report.entries {
        text.push_str(&format!(
            "    {:#08x}  {:<12}  part {:<3}  {} bytes\n",
            entry.offset,
            entry.file_name(),
            entry.part,
            entry.size
        ));
    }
    if !report.names_match_map_id() {
        text.push_str("  note: FAT names differ from the map id\n");
    }
    text.pop();
    text
}
