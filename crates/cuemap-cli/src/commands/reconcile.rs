//! Reconcile command
//!
//! Usage: cuemap reconcile --config <RUN.toml>
//!        cuemap reconcile --old <CSV> --map <CSV> --report <TXT> --dictionary <CSV>
//!                         [--manifest PATH=CONTAINER]... [--events-json <JSON>]

use crate::error::CliError;
use clap::Args;
use cuemap_core::{CueError, CueErrorKind, CueStatus};
use cuemap_core_types::RunId;
use cuemap_engine::run_reconcile;
use cuemap_store::{ManifestEntry, RunConfig};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// TOML run file naming every input and output
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Old cue dictionary (CueName,index,targetFile)
    #[arg(long)]
    pub old: Option<PathBuf>,

    /// New container map (AwbName,Tracks,...)
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Manifest of new cues as PATH=CONTAINER; repeatable, processed in order
    #[arg(long = "manifest", value_name = "PATH=CONTAINER")]
    pub manifests: Vec<String>,

    /// Report output path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Rebuilt dictionary output path
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Optional JSON event log output path
    #[arg(long)]
    pub events_json: Option<PathBuf>,
}

impl ReconcileArgs {
    /// Resolve the arguments into a run configuration.
    pub fn into_config(self) -> Result<RunConfig, CliError> {
        if let Some(path) = self.config {
            let flags = [
                ("--old", self.old.is_some()),
                ("--map", self.map.is_some()),
                ("--manifest", !self.manifests.is_empty()),
                ("--report", self.report.is_some()),
                ("--dictionary", self.dictionary.is_some()),
                ("--events-json", self.events_json.is_some()),
            ];
            if let Some((flag, _)) = flags.iter().find(|(_, set)| *set) {
                return Err(CliError::ConflictingConfig { flag: *flag });
            }
            return Ok(RunConfig::load(&path)?);
        }

        let (Some(old), Some(map), Some(report), Some(dictionary)) =
            (self.old, self.map, self.report, self.dictionary)
        else {
            return Err(CliError::MissingPaths);
        };

        let manifests = self
            .manifests
            .iter()
            .map(|value| {
                ManifestEntry::parse_pair(value).ok_or_else(|| CliError::BadManifest {
                    value: value.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = RunConfig {
            old_dictionary: old,
            container_map: map,
            report,
            new_dictionary: dictionary,
            events_json: self.events_json,
            manifests,
        };
        config.validate().map_err(|reason| {
            CueError::new(CueErrorKind::Config)
                .with_op("parse_args")
                .with_message(reason)
        })?;
        Ok(config)
    }
}

/// Execute reconcile command
pub fn execute(args: ReconcileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.into_config()?;

    let run_id = RunId::new();
    let span = tracing::info_span!("reconcile", run_id = %run_id);
    let _guard = span.enter();

    let outcome = run_reconcile(&config).map_err(CliError::from)?;
    let rec = &outcome.reconciliation;

    for diagnostic in &rec.diagnostics {
        eprintln!("{}", diagnostic);
    }

    println!(
        "Reconciled {} containers: {} remapped, {} removed, {} added",
        rec.new_structure.len(),
        rec.count_status(CueStatus::Remapped),
        rec.count_status(CueStatus::Removed),
        rec.count_status(CueStatus::Added)
    );
    for path in &outcome.written {
        println!("✓ Wrote {}", path.display());
    }
    if !rec.diagnostics.is_empty() {
        println!("{} diagnostic(s); see the report", rec.diagnostics.len());
    }

    Ok(())
}
