//! Event classification.
//!
//! Two passes produce the event log:
//!
//! 1. **Old-entry pass**: every old dictionary row is translated through the
//!    old and new layouts of its container. A row whose local offset still fits
//!    the new container becomes REMAPPED; one past the new track count becomes
//!    REMOVED.
//! 2. **Manifest pass**: every manifest line of the form
//!    `NAME#N (cue1; cue2[pre]; ...)` yields one ADDED event per listed cue at
//!    global index `start + N - 1` of the manifest's container. A track past
//!    the container's new count still lands in the dictionary as long as the
//!    global index exists, but is flagged.
//!
//! Rows and manifests that cannot be placed are skipped and reported as
//! [`Diagnostic`]s rather than silently dropped.

use crate::errors::{RemapError, Result};
use crate::model::{CueEvent, CueSlot, Diagnostic, DiagnosticCode, Layout, ManifestSource, OldCueRow};
use regex::Regex;

/// Manifest line grammar: lazy name, `#`, 1-based track, one whitespace, cue list in parens
///
/// Track digits are ASCII only so every match parses as an integer.
pub const MANIFEST_LINE_PATTERN: &str = r"^(.+?)#([0-9]+)\s\((.*)\)";

/// Tag stripped from cue names in manifests
const PRE_TAG: &str = "[pre]";

/// Ordered event log plus everything that was skipped along the way
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub events: Vec<CueEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A manifest line that matched the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    pub name: String,
    /// 1-based track number within the manifest's container
    pub track: String,
    pub cues: Vec<String>,
}

/// Split a cue list into names, dropping `[pre]` tags and empty items.
pub fn split_cue_list(list: &str) -> Vec<String> {
    list.replace(PRE_TAG, "")
        .split(';')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Match one manifest line; `None` if it does not follow the grammar.
pub fn parse_manifest_line(pattern: &Regex, line: &str) -> Option<ManifestLine> {
    let caps = pattern.captures(line)?;
    Some(ManifestLine {
        name: caps[1].to_string(),
        track: caps[2].to_string(),
        cues: split_cue_list(&caps[3]),
    })
}

/// Compile the manifest line grammar.
///
/// # Errors
///
/// `Pattern` if the regex fails to compile.
pub fn manifest_line_regex() -> std::result::Result<Regex, RemapError> {
    Regex::new(MANIFEST_LINE_PATTERN).map_err(|e| RemapError::Pattern {
        message: e.to_string(),
    })
}

/// Classify every old row against the two layouts.
///
/// Rows without a cue name took part in structure inference but are not cues,
/// so they produce neither events nor diagnostics.
pub fn classify_old_rows(rows: &[OldCueRow], old: &Layout, new: &Layout) -> Classification {
    let mut out = Classification::default();
    for row in rows.iter().filter(|r| !r.cue_name.is_empty()) {
        let (Some(old_range), Some(new_range)) =
            (old.get(&row.target_file), new.get(&row.target_file))
        else {
            out.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::UnknownContainer,
                    "old cue targets a container missing from the new layout; cue dropped",
                )
                .with_context("cue_name", &row.cue_name)
                .with_context("old_index", row.index)
                .with_context("container", &row.target_file),
            );
            continue;
        };

        let Some(local) = row.index.checked_sub(old_range.start_index) else {
            out.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::OldIndexBeforeContainer,
                    "old cue index precedes its container's inferred start; cue dropped",
                )
                .with_context("cue_name", &row.cue_name)
                .with_context("old_index", row.index)
                .with_context("container", &row.target_file)
                .with_context("old_start", old_range.start_index),
            );
            continue;
        };

        let old_slot = CueSlot::new(row.index, row.target_file.clone());
        if local < new_range.track_count {
            let new_slot = CueSlot::new(new_range.start_index + local, row.target_file.clone());
            out.events
                .push(CueEvent::remapped(row.cue_name.clone(), old_slot, new_slot));
        } else {
            out.events
                .push(CueEvent::removed(row.cue_name.clone(), old_slot));
        }
    }
    out
}

/// Classify the lines of every manifest as ADDED events.
///
/// # Errors
///
/// Only if the line grammar fails to compile.
pub fn classify_manifests(
    manifests: &[ManifestSource],
    new: &Layout,
) -> std::result::Result<Classification, RemapError> {
    let pattern = manifest_line_regex()?;
    let total = new.total_tracks();
    let mut out = Classification::default();

    for manifest in manifests {
        let Some(contents) = &manifest.contents else {
            out.diagnostics.push(
                Diagnostic::warning(DiagnosticCode::ManifestNotFound, "manifest file not found")
                    .with_context("path", &manifest.path)
                    .with_context("container", &manifest.container),
            );
            continue;
        };

        let Some(range) = new.get(&manifest.container) else {
            out.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::UnknownManifestContainer,
                    "manifest targets a container missing from the new layout",
                )
                .with_context("path", &manifest.path)
                .with_context("container", &manifest.container),
            );
            continue;
        };

        for (line_no, line) in contents.lines().enumerate() {
            let Some(parsed) = parse_manifest_line(&pattern, line) else {
                continue;
            };

            // 1-based track -> global slot, which must exist somewhere in the new layout
            let global = parsed
                .track
                .parse::<u32>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|local| range.start_index.checked_add(local).map(|g| (local, g)))
                .filter(|&(_, g)| (g as usize) < total);
            let Some((local, global)) = global else {
                out.diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::ManifestIndexOutOfRange,
                        "manifest track does not map to any index of the new layout",
                    )
                    .with_context("path", &manifest.path)
                    .with_context("line", line_no + 1)
                    .with_context("track", &parsed.track)
                    .with_context("container", &manifest.container)
                    .with_context("total_tracks", total),
                );
                continue;
            };

            if local >= range.track_count {
                out.diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::ManifestTrackBeyondContainer,
                        "manifest track lies past its container's new track count",
                    )
                    .with_context("path", &manifest.path)
                    .with_context("line", line_no + 1)
                    .with_context("track", &parsed.track)
                    .with_context("container", &manifest.container)
                    .with_context("track_count", range.track_count)
                    .with_context("new_index", global),
                );
            }

            for cue in parsed.cues {
                out.events.push(CueEvent::added(
                    cue,
                    CueSlot::new(global, manifest.container.clone()),
                ));
            }
        }
    }
    Ok(out)
}

/// Run both passes and concatenate them: old-entry events first, then manifest events.
///
/// # Errors
///
/// `Internal` if the manifest grammar fails to compile.
pub fn classify_events(
    rows: &[OldCueRow],
    old: &Layout,
    new: &Layout,
    manifests: &[ManifestSource],
) -> Result<Classification> {
    let mut out = classify_old_rows(rows, old, new);
    let added = classify_manifests(manifests, new)?;
    out.events.extend(added.events);
    out.diagnostics.extend(added.diagnostics);

    tracing::debug!(
        event_count = out.events.len(),
        diagnostic_count = out.diagnostics.len(),
        "Classified cue events"
    );
    Ok(out)
}
