//! Structured, non-fatal findings returned alongside pipeline results.
//!
//! Diagnostics replace printed warnings: callers (and tests) can assert on the
//! code and context instead of parsing console output. Every diagnostic is a
//! warning; anything worse is a [`CueError`](crate::errors::CueError).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable classification of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// An old cue references a container that the new layout does not list
    UnknownContainer,
    /// An old cue sits before its container's inferred old start index
    OldIndexBeforeContainer,
    /// The supplied container order does not match the old physical layout
    OldOrderMismatch,
    /// A manifest file could not be found
    ManifestNotFound,
    /// A manifest targets a container absent from the new layout
    UnknownManifestContainer,
    /// A manifest line addresses a track that maps to no index of the new layout
    ManifestIndexOutOfRange,
    /// A manifest line addresses a track past its container's new track count
    /// that still falls inside the layout; the cue is added anyway
    ManifestTrackBeyondContainer,
}

impl DiagnosticCode {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticCode::UnknownContainer => "UNKNOWN_CONTAINER",
            DiagnosticCode::OldIndexBeforeContainer => "OLD_INDEX_BEFORE_CONTAINER",
            DiagnosticCode::OldOrderMismatch => "OLD_ORDER_MISMATCH",
            DiagnosticCode::ManifestNotFound => "MANIFEST_NOT_FOUND",
            DiagnosticCode::UnknownManifestContainer => "UNKNOWN_MANIFEST_CONTAINER",
            DiagnosticCode::ManifestIndexOutOfRange => "MANIFEST_INDEX_OUT_OF_RANGE",
            DiagnosticCode::ManifestTrackBeyondContainer => "MANIFEST_TRACK_BEYOND_CONTAINER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    /// Key/value context (container, cue name, path, line number, ...)
    pub context: BTreeMap<String, String>,
}

impl Diagnostic {
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, key: &str, value: impl ToString) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[WARNING] {}: {}", self.code.code(), self.message)?;
        for (key, value) in &self.context {
            write!(f, " ({}: {})", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_context_in_key_order() {
        let diag = Diagnostic::warning(DiagnosticCode::ManifestNotFound, "manifest missing")
            .with_context("path", "cues.txt")
            .with_context("container", "a.awb");
        assert_eq!(
            diag.to_string(),
            "[WARNING] MANIFEST_NOT_FOUND: manifest missing (container: a.awb) (path: cues.txt)"
        );
    }
}
