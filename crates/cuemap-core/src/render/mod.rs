//! Human-readable rendering of reconciliation results.

pub mod report;

pub use report::{render_diagnostics, render_event_log, render_report, render_structure_section};
