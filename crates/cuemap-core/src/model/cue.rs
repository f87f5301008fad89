//! Cue rows, events, and dictionary entries

use serde::{Deserialize, Serialize};

/// File column value used when an event has no old or no new location
pub const NO_FILE: &str = "N/A";

/// Index column value used when an event has no old or no new location
pub const NO_INDEX: i64 = -1;

/// Cue name given to dictionary slots that no event resolved
pub const PLACEHOLDER_CUE: &str = "placeholder";

/// One cleaned row of the old cue dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldCueRow {
    pub cue_name: String,
    pub index: u32,
    pub target_file: String,
}

impl OldCueRow {
    pub fn new(cue_name: impl Into<String>, index: u32, target_file: impl Into<String>) -> Self {
        Self {
            cue_name: cue_name.into(),
            index,
            target_file: target_file.into(),
        }
    }
}

/// How an event relates the old dictionary to the new layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueStatus {
    /// Old cue carried forward to a new global index in the same container
    Remapped,
    /// Old cue's slot no longer exists because its container shrank
    Removed,
    /// Cue authored in a manifest for the new layout
    Added,
}

impl CueStatus {
    /// Status string as it appears in the event report
    pub fn label(&self) -> &'static str {
        match self {
            CueStatus::Remapped => "REMAPPED",
            CueStatus::Removed => "REMOVED (Shrinkage)",
            CueStatus::Added => "ADDED (New)",
        }
    }
}

impl std::fmt::Display for CueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A global index inside a named container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSlot {
    pub index: u32,
    pub file: String,
}

impl CueSlot {
    pub fn new(index: u32, file: impl Into<String>) -> Self {
        Self {
            index,
            file: file.into(),
        }
    }
}

/// One classified cue
///
/// `old` is `None` for ADDED events; `new` is `None` for REMOVED events.
/// Serializes in the flat tabular shape (`oldIndex = -1`, `oldFile = "N/A"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "CueEventRecord")]
pub struct CueEvent {
    pub cue_name: String,
    pub old: Option<CueSlot>,
    pub new: Option<CueSlot>,
    pub status: CueStatus,
}

impl CueEvent {
    pub fn remapped(cue_name: impl Into<String>, old: CueSlot, new: CueSlot) -> Self {
        Self {
            cue_name: cue_name.into(),
            old: Some(old),
            new: Some(new),
            status: CueStatus::Remapped,
        }
    }

    pub fn removed(cue_name: impl Into<String>, old: CueSlot) -> Self {
        Self {
            cue_name: cue_name.into(),
            old: Some(old),
            new: None,
            status: CueStatus::Removed,
        }
    }

    pub fn added(cue_name: impl Into<String>, new: CueSlot) -> Self {
        Self {
            cue_name: cue_name.into(),
            old: None,
            new: Some(new),
            status: CueStatus::Added,
        }
    }

    pub fn old_index(&self) -> i64 {
        self.old.as_ref().map_or(NO_INDEX, |s| i64::from(s.index))
    }

    pub fn old_file(&self) -> &str {
        self.old.as_ref().map_or(NO_FILE, |s| s.file.as_str())
    }

    pub fn new_index(&self) -> i64 {
        self.new.as_ref().map_or(NO_INDEX, |s| i64::from(s.index))
    }

    pub fn new_file(&self) -> &str {
        self.new.as_ref().map_or(NO_FILE, |s| s.file.as_str())
    }
}

/// Flat tabular view of a [`CueEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueEventRecord {
    pub cue_name: String,
    pub old_index: i64,
    pub old_file: String,
    pub new_index: i64,
    pub new_file: String,
    pub status: String,
}

impl From<CueEvent> for CueEventRecord {
    fn from(event: CueEvent) -> Self {
        Self {
            old_index: event.old_index(),
            old_file: event.old_file().to_string(),
            new_index: event.new_index(),
            new_file: event.new_file().to_string(),
            status: event.status.label().to_string(),
            cue_name: event.cue_name,
        }
    }
}

/// One row of the reconstructed dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "CueName")]
    pub cue_name: String,
    #[serde(rename = "targetFile")]
    pub target_file: String,
    pub index: u32,
}

impl DictionaryEntry {
    pub fn new(cue_name: impl Into<String>, target_file: impl Into<String>, index: u32) -> Self {
        Self {
            cue_name: cue_name.into(),
            target_file: target_file.into(),
            index,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.cue_name == PLACEHOLDER_CUE
    }
}
