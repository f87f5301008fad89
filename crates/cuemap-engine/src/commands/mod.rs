//! Command orchestration layer.
//!
//! Each command loads its inputs once, runs the pure pipeline, and only then
//! touches the output side of the store.

pub mod reconcile;
pub mod structure;
