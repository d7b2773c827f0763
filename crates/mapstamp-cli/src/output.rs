//! Output formatting for command results

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// How command results are printed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// One JSON document per line
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Print `value` as JSON, or the text produced by `text` in text mode
pub fn emit<T, W>(
    out: &mut W,
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    W: Write + ?Sized,
{
    match format {
        OutputFormat::Text => writeln!(out, "{}", text())?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(value)?)?,
        OutputFormat::JsonPretty => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
    }
    Ok(())
}

/// Format a `key: value` line with the key padded to a common width
pub fn key_value(key: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<16} {value}", format!("{key}:"))
}
