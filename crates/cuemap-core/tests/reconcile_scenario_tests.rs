//! End-to-end scenarios for the in-memory reconciliation pipeline.
//!
//! All tests operate on in-memory tables (no I/O).

mod common;

use common::{containers, inputs, manifest, old_rows};
use cuemap_core::model::{NO_FILE, NO_INDEX, PLACEHOLDER_CUE};
use cuemap_core::render::render_report;
use cuemap_core::{reconcile, CueStatus, DiagnosticCode, DictionaryEntry, ManifestSource};

// ---------------------------------------------------------------------------
// No-change: identical layouts, no manifests
// ---------------------------------------------------------------------------

#[test]
fn test_no_change_remaps_every_cue_in_place() {
    let map = containers(&[("a.awb", 3), ("b.awb", 2)]);
    let rows = old_rows(&[
        ("a0", 0, "a.awb"),
        ("a2", 2, "a.awb"),
        ("b0", 3, "b.awb"),
        ("b1", 4, "b.awb"),
    ]);

    let result = reconcile(&inputs(&map, &rows, &[])).unwrap();

    assert_eq!(result.events.len(), 4);
    for (event, row) in result.events.iter().zip(&rows) {
        assert_eq!(event.status, CueStatus::Remapped);
        assert_eq!(event.new_index(), i64::from(row.index));
        assert_eq!(event.new_file(), row.target_file);
    }
    assert_eq!(
        result.dictionary,
        vec![
            DictionaryEntry::new("a0", "a.awb", 0),
            DictionaryEntry::new(PLACEHOLDER_CUE, "a.awb", 1),
            DictionaryEntry::new("a2", "a.awb", 2),
            DictionaryEntry::new("b0", "b.awb", 3),
            DictionaryEntry::new("b1", "b.awb", 4),
        ]
    );
    assert!(result.diagnostics.is_empty());
    for entry in result.offset_report.entries() {
        assert_eq!(entry.offset, 0);
        assert_eq!(entry.old_track_count, entry.new_track_count);
    }
}

// ---------------------------------------------------------------------------
// Conflict: ADDED beats REMAPPED at the same index
// ---------------------------------------------------------------------------

#[test]
fn test_added_cue_wins_over_remapped_cue() {
    let map = containers(&[("A", 3)]);
    let rows = old_rows(&[("keep", 0, "A"), ("bar", 1, "A"), ("tail", 2, "A")]);
    let manifests = vec![manifest("A", "A#2 (foo)\n")];

    let result = reconcile(&inputs(&map, &rows, &manifests)).unwrap();

    let bar = result
        .events
        .iter()
        .find(|e| e.cue_name == "bar")
        .unwrap();
    assert_eq!(bar.status, CueStatus::Remapped);
    assert_eq!(bar.new_index(), 1);

    let at_one: Vec<&DictionaryEntry> =
        result.dictionary.iter().filter(|e| e.index == 1).collect();
    assert_eq!(at_one, vec![&DictionaryEntry::new("foo", "A", 1)]);
    assert!(result.dictionary.iter().all(|e| e.cue_name != "bar"));
}

// ---------------------------------------------------------------------------
// Shrinkage: container B loses slots past its new track count
// ---------------------------------------------------------------------------

#[test]
fn test_shrinkage_removes_cues_past_new_track_count() {
    let map = containers(&[("A", 8), ("B", 2)]);
    let rows = old_rows(&[
        ("a_last", 9, "A"),
        ("b_first", 10, "B"),
        ("b_gone", 13, "B"),
        ("b_end", 14, "B"),
    ]);

    let result = reconcile(&inputs(&map, &rows, &[])).unwrap();

    let b_old = result.old_structure.get("B").unwrap();
    assert_eq!((b_old.start_index, b_old.track_count), (10, 5));
    let b_new = result.new_structure.get("B").unwrap();
    assert_eq!((b_new.start_index, b_new.track_count), (8, 2));

    let gone = result
        .events
        .iter()
        .find(|e| e.cue_name == "b_gone")
        .unwrap();
    assert_eq!(gone.status, CueStatus::Removed);
    assert_eq!(gone.new_index(), NO_INDEX);
    assert_eq!(gone.new_file(), NO_FILE);
    assert_eq!(gone.old_index(), 13);

    let first = result
        .events
        .iter()
        .find(|e| e.cue_name == "b_first")
        .unwrap();
    assert_eq!(first.status, CueStatus::Remapped);
    assert_eq!(first.new_index(), 8);

    // A shrank from 10 to 8 tracks, so the old index 9 no longer fits either.
    let a_last = result
        .events
        .iter()
        .find(|e| e.cue_name == "a_last")
        .unwrap();
    assert_eq!(a_last.status, CueStatus::Removed);

    let b_report = result.offset_report.get("B").unwrap();
    assert_eq!(b_report.offset, -2);
    assert_eq!(b_report.track_delta(), -3);
}

// ---------------------------------------------------------------------------
// Alias: one manifest line, several cue names
// ---------------------------------------------------------------------------

#[test]
fn test_alias_line_yields_one_event_per_name() {
    let map = containers(&[("A", 3)]);
    let manifests = vec![manifest("A", "A#2 (alpha; beta)\n")];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    let added: Vec<_> = result
        .events
        .iter()
        .filter(|e| e.status == CueStatus::Added)
        .collect();
    assert_eq!(added.len(), 2);
    assert_eq!(added[0].cue_name, "alpha");
    assert_eq!(added[1].cue_name, "beta");
    for event in &added {
        assert_eq!(event.new_index(), 1);
        assert_eq!(event.new_file(), "A");
        assert_eq!(event.old_index(), NO_INDEX);
        assert_eq!(event.old_file(), NO_FILE);
    }

    assert_eq!(
        result.dictionary,
        vec![
            DictionaryEntry::new(PLACEHOLDER_CUE, "A", 0),
            DictionaryEntry::new("alpha", "A", 1),
            DictionaryEntry::new("beta", "A", 1),
            DictionaryEntry::new(PLACEHOLDER_CUE, "A", 2),
        ]
    );
}

#[test]
fn test_manifest_index_is_relative_to_new_container_start() {
    let map = containers(&[("A", 4), ("B", 3)]);
    let manifests = vec![manifest("B", "intro#1 (b_intro[pre])\nloop#3 (b_loop)\n")];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    let indices: Vec<(String, i64)> = result
        .events
        .iter()
        .map(|e| (e.cue_name.clone(), e.new_index()))
        .collect();
    assert_eq!(
        indices,
        vec![("b_intro".to_string(), 4), ("b_loop".to_string(), 6)]
    );
}

// ---------------------------------------------------------------------------
// Diagnostics instead of silent drops
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_container_is_reported() {
    let map = containers(&[("A", 2)]);
    let rows = old_rows(&[("a0", 0, "A"), ("orphan", 5, "retired.awb")]);

    let result = reconcile(&inputs(&map, &rows, &[])).unwrap();

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.code, DiagnosticCode::UnknownContainer);
    assert_eq!(diag.context_value("cue_name"), Some("orphan"));
    assert_eq!(diag.context_value("container"), Some("retired.awb"));
}

#[test]
fn test_missing_manifest_is_reported_and_run_continues() {
    let map = containers(&[("A", 2), ("B", 2)]);
    let manifests = vec![
        ManifestSource::missing("nowhere.txt", "A"),
        manifest("B", "x#1 (found)\n"),
    ];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    assert_eq!(result.count_status(CueStatus::Added), 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::ManifestNotFound);
    assert_eq!(
        result.diagnostics[0].context_value("path"),
        Some("nowhere.txt")
    );
}

#[test]
fn test_manifest_lines_outside_layout_are_reported() {
    let map = containers(&[("A", 2), ("B", 1)]);
    let manifests = vec![manifest("A", "zero#0 (z)\nfits#2 (ok)\nfar#4 (f)\n")];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    assert_eq!(result.count_status(CueStatus::Added), 1);
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::ManifestIndexOutOfRange,
            DiagnosticCode::ManifestIndexOutOfRange
        ]
    );
    assert_eq!(result.diagnostics[0].context_value("line"), Some("1"));
    assert_eq!(result.diagnostics[1].context_value("line"), Some("3"));
}

#[test]
fn test_manifest_track_spilling_into_next_container_is_added() {
    let map = containers(&[("A", 2), ("B", 2)]);
    let manifests = vec![manifest("A", "x#3 (spill)\n")];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    assert_eq!(result.count_status(CueStatus::Added), 1);
    assert_eq!(result.events[0].new_index(), 2);
    assert_eq!(result.dictionary[2], DictionaryEntry::new("spill", "A", 2));
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.code, DiagnosticCode::ManifestTrackBeyondContainer);
    assert_eq!(diag.context_value("container"), Some("A"));
    assert_eq!(diag.context_value("track_count"), Some("2"));
}

#[test]
fn test_manifest_for_unknown_container_is_reported() {
    let map = containers(&[("A", 1)]);
    let manifests = vec![manifest("Z", "z#1 (zed)\n")];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    assert!(result.events.is_empty());
    assert_eq!(
        result.diagnostics[0].code,
        DiagnosticCode::UnknownManifestContainer
    );
}

#[test]
fn test_non_matching_manifest_lines_are_ignored_silently() {
    let map = containers(&[("A", 2)]);
    let manifests = vec![manifest("A", "header line\n\n// notes\nok#1 (cue)\n")];

    let result = reconcile(&inputs(&map, &[], &manifests)).unwrap();

    assert_eq!(result.events.len(), 1);
    assert!(result.diagnostics.is_empty());
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn test_identical_inputs_render_identical_output() {
    let map = containers(&[("A", 4), ("B", 2)]);
    let rows = old_rows(&[("a1", 1, "A"), ("b0", 3, "B"), ("b2", 5, "B"), ("x", 0, "X")]);
    let manifests = vec![manifest("A", "n#1 (n1; n1_alt)\n")];

    let first = reconcile(&inputs(&map, &rows, &manifests)).unwrap();
    let second = reconcile(&inputs(&map, &rows, &manifests)).unwrap();

    assert_eq!(first, second);
    assert_eq!(render_report(&first), render_report(&second));
}

// ---------------------------------------------------------------------------
// Failure
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_container_fails_the_run() {
    let map = containers(&[("A", 1), ("A", 2)]);

    let err = reconcile(&inputs(&map, &[], &[])).unwrap_err();

    assert_eq!(err.kind(), cuemap_core::CueErrorKind::InvalidInput);
    assert_eq!(err.container(), Some("A"));
}

#[test]
fn test_nameless_rows_shape_structure_but_emit_no_events() {
    let map = containers(&[("A", 4), ("B", 1)]);
    // The nameless row at index 3 is the only evidence that A held 4 tracks.
    let rows = old_rows(&[("a0", 0, "A"), ("", 3, "A"), ("b0", 4, "B")]);

    let result = reconcile(&inputs(&map, &rows, &[])).unwrap();

    assert_eq!(result.old_structure.get("A").unwrap().track_count, 4);
    assert_eq!(result.old_structure.get("B").unwrap().start_index, 4);
    assert_eq!(result.events.len(), 2);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.dictionary[3], DictionaryEntry::new(PLACEHOLDER_CUE, "A", 3));
}

#[test]
fn test_reversed_container_order_drops_cues_before_their_block() {
    let map = containers(&[("a", 2), ("b", 2)]);
    // Physically b came first (0..2) and a second (2..4).
    let rows = old_rows(&[("b0", 0, "b"), ("b1", 1, "b"), ("a0", 2, "a"), ("a1", 3, "a")]);

    let result = reconcile(&inputs(&map, &rows, &[])).unwrap();

    assert_eq!(result.events.len(), 2);
    assert_eq!(result.count_status(CueStatus::Removed), 2);
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::OldOrderMismatch,
            DiagnosticCode::OldIndexBeforeContainer,
            DiagnosticCode::OldIndexBeforeContainer
        ]
    );
    assert_eq!(result.diagnostics[1].context_value("cue_name"), Some("b0"));
    assert_eq!(result.diagnostics[1].context_value("old_start"), Some("4"));
    assert!(result.dictionary.iter().all(|e| e.is_placeholder()));
}
