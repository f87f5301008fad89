//! Reconciliation pipeline: structure analysis, event classification, dictionary build.
//!
//! Each stage runs to completion before the next starts and nothing is shared
//! between stages except their returned values. Any stage error aborts the run;
//! no partial [`Reconciliation`] is ever returned.

use crate::classify::classify_events;
use crate::dictionary::build_dictionary;
use crate::errors::Result;
use crate::model::{
    ContainerSpec, CueEvent, CueStatus, Diagnostic, DictionaryEntry, Layout, ManifestSource,
    OffsetReport, OldCueRow,
};
use crate::structure::analyze_structure;

/// Fully loaded inputs for one run
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInputs<'a> {
    /// New container map, in authoritative enumeration order
    pub containers: &'a [ContainerSpec],
    /// Cleaned old dictionary rows
    pub old_rows: &'a [OldCueRow],
    /// Manifests in processing order
    pub manifests: &'a [ManifestSource],
}

/// Everything a run produces
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub old_structure: Layout,
    pub new_structure: Layout,
    pub offset_report: OffsetReport,
    pub events: Vec<CueEvent>,
    pub dictionary: Vec<DictionaryEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reconciliation {
    pub fn count_status(&self, status: CueStatus) -> usize {
        self.events.iter().filter(|e| e.status == status).count()
    }
}

/// Run the three stages in order.
///
/// Diagnostics are returned, not logged; reporting them is up to the caller.
///
/// # Errors
///
/// `InvalidInput` for a malformed container map, `Internal` for broken
/// layout invariants.
pub fn reconcile(inputs: &ReconcileInputs<'_>) -> Result<Reconciliation> {
    let structures = analyze_structure(inputs.containers, inputs.old_rows)?;
    let classification = classify_events(
        inputs.old_rows,
        &structures.old,
        &structures.new,
        inputs.manifests,
    )?;
    let dictionary = build_dictionary(&classification.events, &structures.new)?;

    let mut diagnostics = structures.diagnostics;
    diagnostics.extend(classification.diagnostics);

    let reconciliation = Reconciliation {
        old_structure: structures.old,
        new_structure: structures.new,
        offset_report: structures.offset_report,
        events: classification.events,
        dictionary,
        diagnostics,
    };
    tracing::debug!(
        remapped = reconciliation.count_status(CueStatus::Remapped),
        removed = reconciliation.count_status(CueStatus::Removed),
        added = reconciliation.count_status(CueStatus::Added),
        "Reconciled cue indices"
    );
    Ok(reconciliation)
}
