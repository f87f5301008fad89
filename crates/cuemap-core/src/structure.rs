//! Structure analysis: old/new container ranges and the offset report.
//!
//! The new layout comes straight from the container map. The old layout is not
//! recorded anywhere; it is inferred from the old dictionary by walking the
//! containers in the *new* enumeration order and taking, for each container,
//! the highest old index that targets it as the end of its block. That makes
//! the inferred old track counts depend on the supplied order, which must match
//! the old physical layout. When it visibly does not, an `OLD_ORDER_MISMATCH`
//! diagnostic is returned.

use crate::errors::{RemapError, Result};
use crate::model::{
    ContainerRange, ContainerSpec, Diagnostic, DiagnosticCode, Layout, OffsetEntry, OffsetReport,
    OldCueRow,
};
use std::collections::HashMap;

/// Output of [`analyze_structure`]
#[derive(Debug, Clone, PartialEq)]
pub struct Structures {
    pub old: Layout,
    pub new: Layout,
    pub offset_report: OffsetReport,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lay out the new containers in container-map row order.
///
/// # Errors
///
/// `DuplicateContainer` or `LayoutOverflow`.
pub fn build_new_layout(specs: &[ContainerSpec]) -> std::result::Result<Layout, RemapError> {
    Layout::from_track_counts(specs.iter().map(|s| (s.name.as_str(), s.track_count)))
}

/// Infer the old layout from the old dictionary, visiting containers in `order`.
///
/// For each container, `track_count = max_old_index - running_start + 1` when
/// the old dictionary references it, else `0`. A container whose highest old
/// index lies before the running start gets `0` and a diagnostic.
///
/// # Errors
///
/// `LayoutOverflow` if an inferred block end exceeds the index space,
/// `DuplicateContainer` if `order` repeats a name.
pub fn infer_old_layout<'a, I>(
    order: I,
    rows: &[OldCueRow],
) -> std::result::Result<(Layout, Vec<Diagnostic>), RemapError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut max_index: HashMap<&str, u32> = HashMap::new();
    for row in rows {
        max_index
            .entry(row.target_file.as_str())
            .and_modify(|m| *m = (*m).max(row.index))
            .or_insert(row.index);
    }

    let (ranges, diagnostics, _) = order.into_iter().try_fold(
        (Vec::new(), Vec::new(), 0u32),
        |(mut ranges, mut diagnostics, start), name| {
            let track_count = match max_index.get(name) {
                Some(&max) if max >= start => (max - start)
                    .checked_add(1)
                    .ok_or_else(|| RemapError::LayoutOverflow {
                        name: name.to_string(),
                    })?,
                Some(&max) => {
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticCode::OldOrderMismatch,
                            "highest old index precedes the container's inferred start; \
                             container order does not match the old layout",
                        )
                        .with_context("container", name)
                        .with_context("max_old_index", max)
                        .with_context("inferred_start", start),
                    );
                    0
                }
                None => 0,
            };
            ranges.push(ContainerRange {
                name: name.to_string(),
                start_index: start,
                track_count,
            });
            let next = start
                .checked_add(track_count)
                .ok_or_else(|| RemapError::LayoutOverflow {
                    name: name.to_string(),
                })?;
            Ok::<_, RemapError>((ranges, diagnostics, next))
        },
    )?;

    Ok((Layout::from_ranges(ranges)?, diagnostics))
}

/// Pair every new container with its old range and compute the offsets.
pub fn build_offset_report(old: &Layout, new: &Layout) -> OffsetReport {
    let entries = new
        .ranges()
        .iter()
        .map(|new_range| {
            let (old_start, old_track_count) = old
                .get(&new_range.name)
                .map_or((-1, 0), |r| (i64::from(r.start_index), r.track_count));
            let new_start = i64::from(new_range.start_index);
            OffsetEntry {
                container: new_range.name.clone(),
                old_track_count,
                new_track_count: new_range.track_count,
                old_start,
                new_start,
                offset: new_start - old_start,
            }
        })
        .collect();
    OffsetReport::new(entries)
}

/// Derive both layouts and the offset report.
///
/// # Errors
///
/// `InvalidInput` when the container map repeats a name or overflows the index
/// space.
pub fn analyze_structure(specs: &[ContainerSpec], old_rows: &[OldCueRow]) -> Result<Structures> {
    let new = build_new_layout(specs)?;
    let (old, diagnostics) = infer_old_layout(new.names(), old_rows)?;
    let offset_report = build_offset_report(&old, &new);

    tracing::debug!(
        container_count = new.len(),
        total_new_tracks = new.total_tracks(),
        diagnostic_count = diagnostics.len(),
        "Analyzed container layouts"
    );
    Ok(Structures {
        old,
        new,
        offset_report,
        diagnostics,
    })
}
