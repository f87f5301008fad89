//! Structure-only command: the offset section of the report without
//! classifying any cue.

#![allow(clippy::result_large_err)]

use cuemap_core::render::{render_diagnostics, render_structure_section};
use cuemap_core::structure::{analyze_structure, Structures};
use cuemap_core::{log_op_end, log_op_error, log_op_start};
use cuemap_store::errors::Result;
use cuemap_store::tables::{read_container_map, read_old_dictionary};
use std::path::Path;

/// Analyze the old and new layouts named by the two tables.
///
/// # Errors
///
/// `NotFound` for a missing table, `InvalidInput` for a malformed one.
pub fn analyze_tables(old_dictionary: &Path, container_map: &Path) -> Result<Structures> {
    let containers = read_container_map(container_map)?;
    let old_rows = read_old_dictionary(old_dictionary)?;
    analyze_structure(&containers, &old_rows)
}

/// Render the structural section (plus any diagnostics) for two tables.
///
/// # Errors
///
/// Same as [`analyze_tables`].
pub fn run_structure(old_dictionary: &Path, container_map: &Path) -> Result<String> {
    log_op_start!("structure_run", path = %container_map.display());
    let start = std::time::Instant::now();

    let result = analyze_tables(old_dictionary, container_map).map(|s| {
        let mut out = render_structure_section(&s.offset_report);
        out.push_str(&render_diagnostics(&s.diagnostics));
        (out, s.offset_report.entries().len())
    });
    let elapsed = start.elapsed().as_millis() as u64;
    match result {
        Ok((text, container_count)) => {
            log_op_end!(
                "structure_run",
                duration_ms = elapsed,
                container_count = container_count
            );
            Ok(text)
        }
        Err(e) => {
            log_op_error!("structure_run", e.clone(), duration_ms = elapsed);
            Err(e)
        }
    }
}
