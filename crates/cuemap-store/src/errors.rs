//! Error handling for cuemap-store
//!
//! Wraps cuemap-core CueError with store-specific helpers

use cuemap_core::errors::{CueError, CueErrorKind};
use std::path::Path;

/// Result type alias using CueError
pub type Result<T> = std::result::Result<T, CueError>;

/// Create an IO error, or `NotFound` when the OS says the file is missing
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> CueError {
    let kind = if err.kind() == std::io::ErrorKind::NotFound {
        CueErrorKind::NotFound
    } else {
        CueErrorKind::Io
    };
    CueError::new(kind)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a missing input error
pub fn not_found(operation: &str, path: &Path) -> CueError {
    CueError::new(CueErrorKind::NotFound)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message("required input file not found")
}

/// Create an error from a CSV decode/encode failure
pub fn csv_error(operation: &str, path: &Path, err: csv::Error) -> CueError {
    if let csv::ErrorKind::Io(io) = err.kind() {
        if io.kind() == std::io::ErrorKind::NotFound {
            return not_found(operation, path);
        }
    }
    CueError::new(CueErrorKind::InvalidInput)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a run configuration error
pub fn config_error(path: &Path, reason: &str) -> CueError {
    CueError::new(CueErrorKind::Config)
        .with_op("load_config")
        .with_path(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create a table validation error
pub fn invalid_input(operation: &str, path: &Path, reason: impl Into<String>) -> CueError {
    CueError::new(CueErrorKind::InvalidInput)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(reason)
}
