//! CSV tables
//!
//! Readers for the old cue dictionary and the container map, and the writer
//! for the rebuilt dictionary. Cells are trimmed; extra columns are ignored.

#![allow(clippy::result_large_err)]

use crate::errors::{csv_error, invalid_input, io_error, Result};
use cuemap_core::errors::{CueError, CueErrorKind};
use cuemap_core::{ContainerSpec, DictionaryEntry, OldCueRow};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Required columns of the old cue dictionary
pub const OLD_DICTIONARY_COLUMNS: [&str; 3] = ["CueName", "index", "targetFile"];

/// Required columns of the container map
pub const CONTAINER_MAP_COLUMNS: [&str; 2] = ["AwbName", "Tracks"];

/// Header of the rebuilt dictionary
pub const NEW_DICTIONARY_HEADER: [&str; 3] = ["CueName", "targetFile", "index"];

#[derive(Debug, Deserialize)]
struct RawCueRow {
    #[serde(rename = "CueName", default)]
    cue_name: Option<String>,
    #[serde(default)]
    index: Option<String>,
    #[serde(rename = "targetFile", default)]
    target_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContainerRow {
    #[serde(rename = "AwbName", default)]
    awb_name: Option<String>,
    #[serde(rename = "Tracks", default)]
    tracks: Option<String>,
}

/// Parse a non-negative integral cell.
///
/// Integral floats such as `3.0` are accepted, since spreadsheet exports
/// often write indices that way. Negative, fractional or non-numeric cells
/// give `None`.
pub fn parse_index(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<u32>() {
        return Some(n);
    }
    let f = cell.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) {
        Some(f as u32)
    } else {
        None
    }
}

fn reader_for<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    required: &[&str],
    op: &str,
    label: &Path,
) -> Result<()> {
    let headers = reader.headers().map_err(|e| csv_error(op, label, e))?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(invalid_input(
            op,
            label,
            format!("missing required column(s): {}", missing.join(", ")),
        ))
    }
}

/// Read the old cue dictionary from a file.
///
/// # Errors
///
/// `NotFound` if the file does not exist, `InvalidInput` if a required
/// column is missing or the CSV is malformed.
pub fn read_old_dictionary(path: &Path) -> Result<Vec<OldCueRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| io_error("read_old_dictionary", path, e))?;
    read_old_dictionary_from_reader(file, path)
}

/// Read the old cue dictionary from any reader; `label` names it in errors.
///
/// Rows whose index is blank or not a non-negative integer are dropped. Rows
/// with a blank cue name are kept with an empty name.
///
/// # Errors
///
/// `InvalidInput` if a required column is missing or the CSV is malformed.
pub fn read_old_dictionary_from_reader<R: Read>(source: R, label: &Path) -> Result<Vec<OldCueRow>> {
    const OP: &str = "read_old_dictionary";
    let mut reader = reader_for(source);
    require_columns(&mut reader, &OLD_DICTIONARY_COLUMNS, OP, label)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in reader.deserialize::<RawCueRow>() {
        let raw = record.map_err(|e| csv_error(OP, label, e))?;
        let Some(index) = raw.index.as_deref().and_then(parse_index) else {
            dropped += 1;
            continue;
        };
        rows.push(OldCueRow::new(
            raw.cue_name.unwrap_or_default(),
            index,
            raw.target_file.unwrap_or_default(),
        ));
    }

    tracing::debug!(
        path = %label.display(),
        entry_count = rows.len(),
        dropped_count = dropped,
        "Read old cue dictionary"
    );
    Ok(rows)
}

/// Read the container map from a file.
///
/// # Errors
///
/// `NotFound` if the file does not exist, `InvalidInput` for a missing
/// column, blank container name, or non-numeric track count.
pub fn read_container_map(path: &Path) -> Result<Vec<ContainerSpec>> {
    let file = std::fs::File::open(path)
        .map_err(|e| io_error("read_container_map", path, e))?;
    read_container_map_from_reader(file, path)
}

/// Read the container map from any reader, preserving row order.
///
/// # Errors
///
/// `InvalidInput` for a missing column, blank container name, or
/// non-numeric track count.
pub fn read_container_map_from_reader<R: Read>(
    source: R,
    label: &Path,
) -> Result<Vec<ContainerSpec>> {
    const OP: &str = "read_container_map";
    let mut reader = reader_for(source);
    require_columns(&mut reader, &CONTAINER_MAP_COLUMNS, OP, label)?;

    let mut specs = Vec::new();
    for record in reader.deserialize::<RawContainerRow>() {
        let raw = record.map_err(|e| csv_error(OP, label, e))?;
        let line = specs.len() + 2;

        let name = raw.awb_name.unwrap_or_default();
        if name.is_empty() {
            return Err(invalid_input(
                OP,
                label,
                format!("line {}: blank AwbName", line),
            ));
        }

        let tracks = raw.tracks.unwrap_or_default();
        let Some(track_count) = parse_index(&tracks) else {
            return Err(invalid_input(
                OP,
                label,
                format!("line {}: Tracks value '{}' is not a track count", line, tracks),
            )
            .with_container(name));
        };

        specs.push(ContainerSpec::new(name, track_count));
    }

    tracing::debug!(
        path = %label.display(),
        container_count = specs.len(),
        "Read container map"
    );
    Ok(specs)
}

/// Render the rebuilt dictionary as CSV bytes (`CueName,targetFile,index`).
///
/// The header is always written, even for an empty dictionary.
///
/// # Errors
///
/// `Serialization` if the CSV writer fails.
pub fn render_dictionary_csv(entries: &[DictionaryEntry]) -> Result<Vec<u8>> {
    let ser_err = |message: String| {
        CueError::new(CueErrorKind::Serialization)
            .with_op("render_dictionary_csv")
            .with_message(message)
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(NEW_DICTIONARY_HEADER)
        .map_err(|e| ser_err(e.to_string()))?;
    for entry in entries {
        writer
            .serialize(entry)
            .map_err(|e| ser_err(e.to_string()))?;
    }
    writer.into_inner().map_err(|e| ser_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> &'static Path {
        Path::new("inline.csv")
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("12"), Some(12));
        assert_eq!(parse_index(" 7 "), Some(7));
        assert_eq!(parse_index("3.0"), Some(3));
        assert_eq!(parse_index("3.5"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("abc"), None);
        assert_eq!(parse_index("NaN"), None);
    }

    #[test]
    fn test_old_dictionary_drops_bad_indices_and_keeps_blank_names() {
        let csv = "CueName,index,targetFile\n\
                   a, 0 ,x.awb\n\
                   b,,x.awb\n\
                   c,oops,x.awb\n\
                   ,4,x.awb\n\
                   d,5.0,y.awb\n";
        let rows = read_old_dictionary_from_reader(csv.as_bytes(), label()).unwrap();
        assert_eq!(
            rows,
            vec![
                OldCueRow::new("a", 0, "x.awb"),
                OldCueRow::new("", 4, "x.awb"),
                OldCueRow::new("d", 5, "y.awb"),
            ]
        );
    }

    #[test]
    fn test_old_dictionary_ignores_extra_columns_and_order() {
        let csv = "targetFile,notes,index,CueName\nx.awb,hello,2,a\n";
        let rows = read_old_dictionary_from_reader(csv.as_bytes(), label()).unwrap();
        assert_eq!(rows, vec![OldCueRow::new("a", 2, "x.awb")]);
    }

    #[test]
    fn test_old_dictionary_missing_column_is_invalid_input() {
        let csv = "CueName,targetFile\na,x.awb\n";
        let err = read_old_dictionary_from_reader(csv.as_bytes(), label()).unwrap_err();
        assert_eq!(err.kind(), CueErrorKind::InvalidInput);
        assert!(err.message().contains("index"));
    }

    #[test]
    fn test_container_map_preserves_order() {
        let csv = "AwbName,AcbName,Tracks,PortNo\n\
                   b.awb,b.acb,3,0\n\
                   a.awb,a.acb,5,1\n";
        let specs = read_container_map_from_reader(csv.as_bytes(), label()).unwrap();
        assert_eq!(
            specs,
            vec![ContainerSpec::new("b.awb", 3), ContainerSpec::new("a.awb", 5)]
        );
    }

    #[test]
    fn test_container_map_bad_tracks_is_invalid_input() {
        let csv = "AwbName,Tracks\na.awb,many\n";
        let err = read_container_map_from_reader(csv.as_bytes(), label()).unwrap_err();
        assert_eq!(err.kind(), CueErrorKind::InvalidInput);
        assert_eq!(err.container(), Some("a.awb"));
    }

    #[test]
    fn test_render_dictionary_csv() {
        let bytes = render_dictionary_csv(&[
            DictionaryEntry::new("a0", "a.awb", 0),
            DictionaryEntry::new("placeholder", "a.awb", 1),
        ])
        .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "CueName,targetFile,index\na0,a.awb,0\nplaceholder,a.awb,1\n"
        );
    }

    #[test]
    fn test_render_empty_dictionary_keeps_header() {
        let bytes = render_dictionary_csv(&[]).unwrap();
        assert_eq!(bytes, b"CueName,targetFile,index\n");
    }
}
