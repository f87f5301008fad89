//! Loaded manifest files

use serde::{Deserialize, Serialize};

/// One manifest of newly authored cues, already read into memory
///
/// `contents` is `None` when the file could not be found; the classifier
/// reports that as a diagnostic and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSource {
    /// Path label used in diagnostics
    pub path: String,
    /// Container whose local indices the manifest lines address
    pub container: String,
    pub contents: Option<String>,
}

impl ManifestSource {
    pub fn loaded(
        path: impl Into<String>,
        container: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            container: container.into(),
            contents: Some(contents.into()),
        }
    }

    pub fn missing(path: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            container: container.into(),
            contents: None,
        }
    }
}
