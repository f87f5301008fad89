//! cuemap Engine - Orchestration layer
//!
//! Provides run-level command functions that coordinate between the
//! in-memory reconciliation kernel and the file store.

pub mod commands;

pub use commands::reconcile::{run_reconcile, RunOutcome};
pub use commands::structure::run_structure;
