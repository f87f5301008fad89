//! Text report renderer.
//!
//! Layout: a structural section (one block per container in new-layout order),
//! an 80-column rule, then a column-aligned event table sorted by cue name, old
//! index, new index. Diagnostics follow in their own section when present.
//! Output is a pure function of the reconciliation, so identical runs render
//! byte-identical reports.

use crate::model::{CueEvent, Diagnostic, OffsetReport};
use crate::pipeline::Reconciliation;
use std::fmt::Write as _;

const RULE_WIDTH: usize = 80;

/// Render the `--- Structural Change & Offset Report ---` section.
pub fn render_structure_section(report: &OffsetReport) -> String {
    let mut out = String::from("--- Structural Change & Offset Report ---\n");
    for entry in report.entries() {
        let _ = write!(out, "\n[*] Analysis for: {}\n", entry.container);
        let _ = writeln!(
            out,
            "    - Track Count: {} -> {} (Delta: {})",
            entry.old_track_count,
            entry.new_track_count,
            entry.track_delta()
        );
        if entry.offset != 0 {
            let _ = writeln!(
                out,
                "    - Index Offset: {} (Old Start: {} -> New Start: {})",
                entry.offset, entry.old_start, entry.new_start
            );
        }
    }
    out
}

/// Render the `--- Detailed Event Log ---` table.
pub fn render_event_log(events: &[CueEvent]) -> String {
    let mut sorted: Vec<&CueEvent> = events.iter().collect();
    sorted.sort_by(|a, b| {
        a.cue_name
            .cmp(&b.cue_name)
            .then(a.old_index().cmp(&b.old_index()))
            .then(a.new_index().cmp(&b.new_index()))
    });

    let width = |header: &str, cell: fn(&CueEvent) -> &str| {
        sorted
            .iter()
            .map(|e| cell(e).chars().count())
            .max()
            .unwrap_or(0)
            .max(header.chars().count())
    };
    let cue_w = width("cueName", |e| e.cue_name.as_str());
    let old_w = width("oldFile", |e| e.old_file());
    let new_w = width("newFile", |e| e.new_file());

    let mut out = String::from("--- Detailed Event Log ---\n");
    let _ = writeln!(
        out,
        "{:<cue_w$}  {:>8}  {:<old_w$}  ->  {:>8}  {:<new_w$}  Status",
        "cueName", "oldIndex", "oldFile", "newIndex", "newFile"
    );
    let _ = writeln!(
        out,
        "{}  {}  {}      {}  {}  {}",
        "-".repeat(cue_w),
        "-".repeat(10),
        "-".repeat(old_w),
        "-".repeat(10),
        "-".repeat(new_w),
        "-".repeat(25)
    );
    for e in sorted {
        let _ = writeln!(
            out,
            "{:<cue_w$}  {:>8}  {:<old_w$}  ->  {:>8}  {:<new_w$}  {}",
            e.cue_name,
            e.old_index(),
            e.old_file(),
            e.new_index(),
            e.new_file(),
            e.status.label()
        );
    }
    out
}

/// Render the `--- Diagnostics ---` section, or nothing when there are none.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n--- Diagnostics ---\n");
    for diagnostic in diagnostics {
        let _ = writeln!(out, "{}", diagnostic);
    }
    out
}

/// Render the full report file.
pub fn render_report(reconciliation: &Reconciliation) -> String {
    let mut out = render_structure_section(&reconciliation.offset_report);
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");
    out.push_str(&render_event_log(&reconciliation.events));
    out.push_str(&render_diagnostics(&reconciliation.diagnostics));
    out
}
