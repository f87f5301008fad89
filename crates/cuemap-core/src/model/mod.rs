//! Domain model: layouts, cue rows and events, offset report, diagnostics.

pub mod container;
pub mod cue;
pub mod diagnostic;
pub mod manifest;
pub mod offset;

pub use container::{ContainerRange, ContainerSpec, Layout};
pub use cue::{
    CueEvent, CueEventRecord, CueSlot, CueStatus, DictionaryEntry, OldCueRow, NO_FILE, NO_INDEX,
    PLACEHOLDER_CUE,
};
pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use manifest::ManifestSource;
pub use offset::{OffsetEntry, OffsetReport};
