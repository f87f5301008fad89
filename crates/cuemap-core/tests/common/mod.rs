use cuemap_core::{ContainerSpec, ManifestSource, OldCueRow, ReconcileInputs};

/// Container map rows from `(name, track_count)` pairs
#[allow(dead_code)]
pub fn containers(items: &[(&str, u32)]) -> Vec<ContainerSpec> {
    items
        .iter()
        .map(|(name, count)| ContainerSpec::new(*name, *count))
        .collect()
}

/// Old dictionary rows from `(cue_name, index, target_file)` triples
#[allow(dead_code)]
pub fn old_rows(items: &[(&str, u32, &str)]) -> Vec<OldCueRow> {
    items
        .iter()
        .map(|(cue, index, file)| OldCueRow::new(*cue, *index, *file))
        .collect()
}

/// A manifest that was found on disk
#[allow(dead_code)]
pub fn manifest(container: &str, contents: &str) -> ManifestSource {
    ManifestSource::loaded(format!("{}_cues.txt", container), container, contents)
}

#[allow(dead_code)]
pub fn inputs<'a>(
    containers: &'a [ContainerSpec],
    old_rows: &'a [OldCueRow],
    manifests: &'a [ManifestSource],
) -> ReconcileInputs<'a> {
    ReconcileInputs {
        containers,
        old_rows,
        manifests,
    }
}
