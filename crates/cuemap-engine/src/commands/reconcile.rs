//! Reconcile orchestration with staged output commit.
//!
//! ## Run pipeline (in order):
//! 1. Load the container map, old dictionary and manifests (each read once)
//! 2. Reconcile in memory
//! 3. Render the report, dictionary CSV and optional event log in memory
//! 4. Stage every output to a temp sibling
//! 5. Commit (rename) all staged outputs
//!
//! A failure in steps 1-4 leaves the output paths untouched.

#![allow(clippy::result_large_err)]

use cuemap_core::errors::{CueError, CueErrorKind};
use cuemap_core::render::render_report;
use cuemap_core::{log_op_end, log_op_error, log_op_start};
use cuemap_core::{
    reconcile, ContainerSpec, CueEvent, ManifestSource, OldCueRow, ReconcileInputs,
    Reconciliation,
};
use cuemap_store::errors::Result;
use cuemap_store::manifest::load_manifests;
use cuemap_store::tables::{read_container_map, read_old_dictionary, render_dictionary_csv};
use cuemap_store::{RunConfig, StagedOutputs};
use std::path::PathBuf;

/// Every input of a run, loaded into memory
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub containers: Vec<ContainerSpec>,
    pub old_rows: Vec<OldCueRow>,
    pub manifests: Vec<ManifestSource>,
}

impl LoadedInputs {
    pub fn as_inputs(&self) -> ReconcileInputs<'_> {
        ReconcileInputs {
            containers: &self.containers,
            old_rows: &self.old_rows,
            manifests: &self.manifests,
        }
    }
}

/// Output bytes of a run, rendered but not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutputs {
    pub report: String,
    pub dictionary_csv: Vec<u8>,
    pub events_json: Option<Vec<u8>>,
}

/// Result of a committed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub reconciliation: Reconciliation,
    /// Output files in the order they were committed
    pub written: Vec<PathBuf>,
}

/// Load every input named by `config`.
///
/// The container map is read first so a missing map fails before anything
/// else is touched.
///
/// # Errors
///
/// `NotFound` for a missing table, `InvalidInput` for a malformed one, `Io`
/// for an unreadable manifest.
pub fn load_inputs(config: &RunConfig) -> Result<LoadedInputs> {
    let containers = read_container_map(&config.container_map)?;
    let old_rows = read_old_dictionary(&config.old_dictionary)?;
    let manifests = load_manifests(&config.manifests)?;
    Ok(LoadedInputs {
        containers,
        old_rows,
        manifests,
    })
}

/// Serialize the event log as pretty JSON with a trailing newline.
///
/// # Errors
///
/// `Serialization` if serde_json fails.
pub fn render_events_json(events: &[CueEvent]) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(events).map_err(|e| {
        CueError::new(CueErrorKind::Serialization)
            .with_op("render_events_json")
            .with_message(format!("Failed to serialize event log: {}", e))
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Render every output of a run in memory.
///
/// # Errors
///
/// `Serialization` if the CSV or JSON writer fails.
pub fn render_outputs(
    reconciliation: &Reconciliation,
    with_events_json: bool,
) -> Result<RenderedOutputs> {
    let events_json = if with_events_json {
        Some(render_events_json(&reconciliation.events)?)
    } else {
        None
    };
    Ok(RenderedOutputs {
        report: render_report(reconciliation),
        dictionary_csv: render_dictionary_csv(&reconciliation.dictionary)?,
        events_json,
    })
}

/// Run a full reconciliation and commit its outputs together.
///
/// # Errors
///
/// Any load, pipeline, render or write error. When the error happens
/// before the commit step, no output file has been created or replaced.
pub fn run_reconcile(config: &RunConfig) -> Result<RunOutcome> {
    log_op_start!(
        "reconcile_run",
        manifest_count = config.manifests.len(),
        path = %config.old_dictionary.display()
    );
    let start = std::time::Instant::now();

    let result = run_reconcile_impl(config);
    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => {
            log_op_end!(
                "reconcile_run",
                duration_ms = elapsed,
                event_count = outcome.reconciliation.events.len(),
                entry_count = outcome.reconciliation.dictionary.len(),
                diagnostic_count = outcome.reconciliation.diagnostics.len()
            );
        }
        Err(e) => {
            log_op_error!("reconcile_run", e.clone(), duration_ms = elapsed);
        }
    }
    result
}

fn run_reconcile_impl(config: &RunConfig) -> Result<RunOutcome> {
    let inputs = load_inputs(config)?;
    let reconciliation = reconcile(&inputs.as_inputs())?;
    let rendered = render_outputs(&reconciliation, config.events_json.is_some())?;

    let mut stage = StagedOutputs::new();
    stage.stage(&config.report, rendered.report.as_bytes())?;
    stage.stage(&config.new_dictionary, &rendered.dictionary_csv)?;
    if let (Some(path), Some(bytes)) = (&config.events_json, &rendered.events_json) {
        stage.stage(path, bytes)?;
    }
    let written = stage.commit()?;

    Ok(RunOutcome {
        reconciliation,
        written,
    })
}
