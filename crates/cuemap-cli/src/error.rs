//! CLI boundary errors

use cuemap_core::CueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("either --config or all of --old, --map, --report and --dictionary are required")]
    MissingPaths,

    #[error("--config cannot be combined with {flag}")]
    ConflictingConfig { flag: &'static str },

    #[error("invalid --manifest value '{value}': expected PATH=CONTAINER")]
    BadManifest { value: String },

    #[error(transparent)]
    Cue(#[from] CueError),
}
