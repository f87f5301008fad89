//! Run configuration
//!
//! A run is described by a TOML file naming every input and output:
//!
//! ```toml
//! old_dictionary = "bgm_dictionary.csv"
//! container_map  = "acb_mapping.csv"
//! report         = "diff.txt"
//! new_dictionary = "bgm_dictionary_new.csv"
//! events_json    = "events.json"
//!
//! [[manifest]]
//! path      = "bgm_main_cues.txt"
//! container = "bgm_main.awb"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

#![allow(clippy::result_large_err)]

use crate::errors::{config_error, io_error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One manifest and the container its track numbers address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub container: String,
}

impl ManifestEntry {
    pub fn new(path: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            container: container.into(),
        }
    }

    /// Parse the CLI form `PATH=CONTAINER`, splitting on the last `=`.
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (path, container) = pair.rsplit_once('=')?;
        let (path, container) = (path.trim(), container.trim());
        if path.is_empty() || container.is_empty() {
            return None;
        }
        Some(Self::new(path, container))
    }
}

/// Every path a reconciliation run reads or writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub old_dictionary: PathBuf,
    pub container_map: PathBuf,
    pub report: PathBuf,
    pub new_dictionary: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_json: Option<PathBuf>,
    /// Processing order is file order
    #[serde(rename = "manifest", default)]
    pub manifests: Vec<ManifestEntry>,
}

impl RunConfig {
    /// Load a run file from disk.
    ///
    /// # Errors
    ///
    /// `NotFound` if the file is missing, `Config` if it does not parse or
    /// names an output path twice.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| io_error("load_config", path, e))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_toml_str(&content, base_dir)
            .map_err(|e| e.with_path(path.display().to_string()))?;

        tracing::debug!(
            path = %path.display(),
            manifest_count = config.manifests.len(),
            "Loaded run configuration"
        );
        Ok(config)
    }

    /// Parse a run file and resolve its relative paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// `Config` if the TOML does not parse or names an output path twice.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let parsed: RunConfig = toml::from_str(content)
            .map_err(|e| config_error(base_dir, &format!("TOML parse error: {}", e)))?;
        let config = parsed.resolved_against(base_dir);
        config.validate().map_err(|reason| config_error(base_dir, &reason))?;
        Ok(config)
    }

    /// Rebase every relative path onto `base_dir`.
    pub fn resolved_against(mut self, base_dir: &Path) -> Self {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };
        rebase(&mut self.old_dictionary);
        rebase(&mut self.container_map);
        rebase(&mut self.report);
        rebase(&mut self.new_dictionary);
        if let Some(p) = self.events_json.as_mut() {
            rebase(p);
        }
        for manifest in &mut self.manifests {
            rebase(&mut manifest.path);
        }
        self
    }

    /// Output paths in commit order
    pub fn output_paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.report.as_path(), self.new_dictionary.as_path()];
        if let Some(p) = &self.events_json {
            paths.push(p.as_path());
        }
        paths
    }

    /// Outputs must be distinct from each other and from every input.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let outputs = self.output_paths();
        for (i, out) in outputs.iter().enumerate() {
            if outputs[..i].contains(out) {
                return Err(format!("output path {} is named twice", out.display()));
            }
            let clashes_input = *out == self.old_dictionary.as_path()
                || *out == self.container_map.as_path()
                || self.manifests.iter().any(|m| *out == m.path.as_path());
            if clashes_input {
                return Err(format!(
                    "output path {} would overwrite an input",
                    out.display()
                ));
            }
        }
        Ok(())
    }
}
