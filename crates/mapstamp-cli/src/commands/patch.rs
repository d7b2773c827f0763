//! `rename` and `set-id`: in-place container patches

use crate::output::{OutputFormat, emit, key_value};
use anyhow::Context;
use mapstamp_img::{IdUpdate, MapId, RenameReport};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct Patched<'a, T> {
    path: &'a Path,
    #[serde(flatten)]
    result: &'a T,
}

/// Rename every subfile and update the header
pub fn rename<W: Write>(
    path: &Path,
    map_id: MapId,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let report = mapstamp_img::rename(path, map_id)
        .with_context(|| format!("failed to rename {}", path.display()))?;
    let patched = Patched {
        path,
        result: &report,
    };
    emit(out, format, &patched, || render_rename(path, &report))
}

/// Rewrite the header map id and values only
pub fn set_id<W: Write>(
    path: &Path,
    map_id: MapId,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let update = mapstamp_img::set_map_id(path, map_id)
        .with_context(|| format!("failed to set map id of {}", path.display()))?;
    let patched = Patched {
        path,
        result: &update,
    };
    emit(out, format, &patched, || {
        format!("{}\n{}", path.display(), render_update(&update))
    })
}

fn render_update(update: &IdUpdate) -> String {
    [
        key_value("header start", format!("{:#x}", update.header_start)),
        key_value(
            "map id",
            format!("{} -> {}", update.old_map_id, update.new_map_id),
        ),
        key_value("old values", update.old_values),
        key_value("new values", update.new_values),
    ]
    .join("\n")
}

pub(crate) fn render_rename(path: &Path, report: &RenameReport) -> String {
    format!(
        "{}\n{}\n{}",
        path.display(),
        key_value(
            "fat entries",
            format!(
                "{} renamed from {}",
                report.count,
                report.previous_name.as_deref().unwrap_or("-")
            )
        ),
        render_update(&report.update)
    )
}
