//! Dictionary reconstruction.
//!
//! Fill priority per global index of the new layout:
//!
//! 1. every ADDED event (aliases accumulate in event order),
//! 2. the first REMAPPED event, only if the slot is still empty,
//! 3. a single `placeholder` entry owned by the container whose block holds the index.
//!
//! REMOVED events never reach the dictionary.

use crate::errors::{RemapError, Result};
use crate::model::{CueEvent, CueSlot, CueStatus, DictionaryEntry, Layout, PLACEHOLDER_CUE};

fn slot_position(slot: &CueSlot, total: usize) -> std::result::Result<usize, RemapError> {
    let position = slot.index as usize;
    if position < total {
        Ok(position)
    } else {
        Err(RemapError::SlotOutOfRange {
            index: i64::from(slot.index),
            total,
        })
    }
}

/// Merge the event log into index-ordered dictionary rows for `new`.
///
/// # Errors
///
/// `SlotOutOfRange` if an ADDED or REMAPPED event lies outside the layout,
/// `UnownedIndex` if a slot needing a placeholder has no owning container.
/// Both indicate a defect upstream.
pub fn merge_events(
    events: &[CueEvent],
    new: &Layout,
) -> std::result::Result<Vec<DictionaryEntry>, RemapError> {
    let total = new.total_tracks();
    let mut slots: Vec<Vec<(&str, &str)>> = vec![Vec::new(); total];

    for event in events.iter().filter(|e| e.status == CueStatus::Added) {
        if let Some(slot) = &event.new {
            let position = slot_position(slot, total)?;
            slots[position].push((event.cue_name.as_str(), slot.file.as_str()));
        }
    }

    for event in events.iter().filter(|e| e.status == CueStatus::Remapped) {
        if let Some(slot) = &event.new {
            let position = slot_position(slot, total)?;
            if slots[position].is_empty() {
                slots[position].push((event.cue_name.as_str(), slot.file.as_str()));
            }
        }
    }

    let mut entries = Vec::with_capacity(total);
    for (position, cues) in slots.into_iter().enumerate() {
        // position < total, which fits u32 by Layout's construction
        let index = position as u32;
        if cues.is_empty() {
            let owner = new
                .owner_of(index)
                .ok_or(RemapError::UnownedIndex { index })?;
            entries.push(DictionaryEntry::new(PLACEHOLDER_CUE, owner.name.clone(), index));
        } else {
            entries.extend(
                cues.into_iter()
                    .map(|(cue, file)| DictionaryEntry::new(cue, file, index)),
            );
        }
    }
    Ok(entries)
}

/// Build the final dictionary.
///
/// # Errors
///
/// `Internal` when an event or slot breaks a layout invariant.
pub fn build_dictionary(events: &[CueEvent], new: &Layout) -> Result<Vec<DictionaryEntry>> {
    let entries = merge_events(events, new)?;
    tracing::debug!(
        entry_count = entries.len(),
        placeholder_count = entries.iter().filter(|e| e.is_placeholder()).count(),
        "Built dictionary"
    );
    Ok(entries)
}
