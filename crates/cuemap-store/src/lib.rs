//! cuemap Store - file access for the reconciliation pipeline
//!
//! Provides:
//! - CSV readers for the old cue dictionary and the container map
//! - Manifest loading (missing manifests become diagnostics, not errors)
//! - TOML run configuration
//! - Staged atomic commit of every output file

pub mod commit;
pub mod config;
pub mod errors;
pub mod manifest;
pub mod tables;

// Re-export key types
pub use commit::StagedOutputs;
pub use config::{ManifestEntry, RunConfig};
pub use errors::Result;
