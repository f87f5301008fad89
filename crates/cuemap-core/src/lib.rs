//! cuemap Core - audio cue index reconciliation kernel
//!
//! Given a new container map and the old cue dictionary, this crate:
//! - derives old and new per-container index ranges and an offset report
//! - classifies every old cue as remapped or removed, and every manifest cue as added
//! - rebuilds an index-ordered dictionary for the new layout
//! - renders the human-readable offset/event report
//!
//! Everything here is pure and in-memory; file access lives in `cuemap-store`.

pub mod classify;
pub mod dictionary;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod structure;

#[doc(hidden)]
pub use cuemap_core_types as core_types;

// Re-export commonly used types
pub use errors::{CueError, CueErrorKind, RemapError, Result};
pub use model::{
    ContainerRange, ContainerSpec, CueEvent, CueSlot, CueStatus, Diagnostic, DiagnosticCode,
    DictionaryEntry, Layout, ManifestSource, OffsetEntry, OffsetReport, OldCueRow,
};
pub use pipeline::{reconcile, ReconcileInputs, Reconciliation};
