//! Atomic output commit
//!
//! Uses temp→rename so no output is ever partially written. A run stages
//! all of its outputs first and renames them into place only once every
//! one of them has been written; dropping an uncommitted stage removes the
//! temporaries.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Temp sibling for `target`: the full file name plus `.tmp`
///
/// Appending rather than replacing the extension keeps `diff.txt` and
/// `diff.csv` from sharing a temp file.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn ensure_parent(target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
        }
    }
    Ok(())
}

/// A set of outputs written to temp siblings, awaiting commit
#[derive(Debug, Default)]
pub struct StagedOutputs {
    /// (temp, target) pairs in staging order
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `content` to the temp sibling of `target`.
    ///
    /// # Errors
    ///
    /// `Io` if the parent directory or the temp file cannot be written.
    pub fn stage(&mut self, target: &Path, content: &[u8]) -> Result<()> {
        ensure_parent(target)?;
        let temp = temp_path_for(target);
        // Track before writing so a failed write is still cleaned up on drop.
        self.staged.push((temp.clone(), target.to_path_buf()));
        fs::write(&temp, content).map_err(|e| io_error("stage_output", &temp, e))?;

        tracing::debug!(
            path = %target.display(),
            size_bytes = content.len(),
            "Staged output"
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Rename every staged temp onto its target, in staging order.
    ///
    /// # Errors
    ///
    /// `Io` if a rename fails. Temps not yet renamed are removed.
    pub fn commit(mut self) -> Result<Vec<PathBuf>> {
        let staged = std::mem::take(&mut self.staged);
        let mut committed = Vec::with_capacity(staged.len());
        let mut pending = staged.into_iter();

        while let Some((temp, target)) = pending.next() {
            if let Err(e) = fs::rename(&temp, &target) {
                let _ = fs::remove_file(&temp);
                for (rest, _) in pending {
                    let _ = fs::remove_file(rest);
                }
                return Err(io_error("commit_output", &target, e));
            }
            committed.push(target);
        }

        tracing::debug!(output_count = committed.len(), "Committed outputs");
        Ok(committed)
    }
}

impl Drop for StagedOutputs {
    fn drop(&mut self) {
        for (temp, _) in self.staged.drain(..) {
            let _ = fs::remove_file(temp);
        }
    }
}
