//! `checksum`: map values for a map id, without touching any file

use crate::output::{OutputFormat, emit, key_value};
use mapstamp_checksum::{MapId, VerificationWords, compute};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ChecksumOutput {
    map_id: MapId,
    header_length: u8,
    values: VerificationWords,
    /// Values as stored in the header
    encoded: String,
}

impl ChecksumOutput {
    fn new(map_id: MapId, header_length: u8) -> Self {
        let values = compute(map_id, header_length);
        let encoded = values
            .to_le_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self {
            map_id,
            header_length,
            values,
            encoded,
        }
    }
}

/// Print the map values for `map_id`
pub fn handle<W: Write>(
    map_id: MapId,
    header_length: u8,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let output = ChecksumOutput::new(map_id, header_length);
    emit(out, format, &output, || {
        [
            key_value("map id", output.map_id),
            key_value("header length", output.header_length),
            key_value("values", output.values),
            key_value("encoded", &output.encoded),
        ]
        .join("\n")
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encoded_is_little_endian() {
        let output = ChecksumOutput::new(MapId::new(10230), 188);
        assert_eq!(
            output.encoded,
            "746ff627736fbc00736f0000736f0000"
        );
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        handle(MapId::new(0), 0, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("00000000"));
        assert!(text.contains("66666667 66666666 66666666 66666666"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        handle(MapId::new(10230), 188, OutputFormat::Json, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["map_id"], 10230);
        assert_eq!(json["header_length"], 188);
        assert_eq!(json["values"][0], 0x27f6_6f74_u32);
    }
}
