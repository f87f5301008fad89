//! Manifest loading
//!
//! Manifests are optional inputs: a missing file is loaded as
//! [`ManifestSource::missing`] and reported downstream as a diagnostic.

#![allow(clippy::result_large_err)]

use crate::config::ManifestEntry;
use crate::errors::{io_error, Result};
use cuemap_core::ManifestSource;
use std::fs;
use std::io::ErrorKind;

/// Load every configured manifest, in configuration order.
///
/// # Errors
///
/// `Io` for any read failure other than the file being absent.
pub fn load_manifests(entries: &[ManifestEntry]) -> Result<Vec<ManifestSource>> {
    entries.iter().map(load_manifest).collect()
}

/// Load a single manifest.
///
/// # Errors
///
/// `Io` for any read failure other than the file being absent.
pub fn load_manifest(entry: &ManifestEntry) -> Result<ManifestSource> {
    let label = entry.path.display().to_string();
    match fs::read_to_string(&entry.path) {
        Ok(contents) => {
            tracing::debug!(
                path = %label,
                container = %entry.container,
                size_bytes = contents.len(),
                "Loaded manifest"
            );
            Ok(ManifestSource::loaded(label, &entry.container, contents))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Ok(ManifestSource::missing(label, &entry.container))
        }
        Err(e) => Err(io_error("load_manifest", &entry.path, e).with_container(&entry.container)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_existing_and_missing_manifests() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("a_cues.txt");
        fs::write(&present, "x#1 (cue)\n").unwrap();

        let entries = vec![
            ManifestEntry::new(present.clone(), "a.awb"),
            ManifestEntry::new(dir.path().join("gone.txt"), "b.awb"),
        ];
        let loaded = load_manifests(&entries).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].contents.as_deref(), Some("x#1 (cue)\n"));
        assert_eq!(loaded[0].container, "a.awb");
        assert!(loaded[1].contents.is_none());
        assert!(loaded[1].path.ends_with("gone.txt"));
    }

    #[test]
    fn test_directory_in_place_of_manifest_is_io_error() {
        let dir = TempDir::new().unwrap();
        let entries = vec![ManifestEntry::new(dir.path().to_path_buf(), "a.awb")];

        let err = load_manifests(&entries).unwrap_err();
        assert_eq!(err.kind(), cuemap_core::CueErrorKind::Io);
        assert_eq!(err.container(), Some("a.awb"));
    }
}
