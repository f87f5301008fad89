//! Per-container offset report

use serde::{Deserialize, Serialize};

/// Old/new track counts and start indices for one container
///
/// `old_start` is `-1` when the container has no old-structure entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetEntry {
    pub container: String,
    pub old_track_count: u32,
    pub new_track_count: u32,
    pub old_start: i64,
    pub new_start: i64,
    pub offset: i64,
}

impl OffsetEntry {
    /// Signed change in track count
    pub fn track_delta(&self) -> i64 {
        i64::from(self.new_track_count) - i64::from(self.old_track_count)
    }
}

/// Offset entries in new-layout enumeration order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetReport {
    entries: Vec<OffsetEntry>,
}

impl OffsetReport {
    pub fn new(entries: Vec<OffsetEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[OffsetEntry] {
        &self.entries
    }

    pub fn get(&self, container: &str) -> Option<&OffsetEntry> {
        self.entries.iter().find(|e| e.container == container)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
