//! Container layouts
//!
//! A [`Layout`] is the ordered list of containers for one build revision, each
//! owning a contiguous block of global indices. Ranges are always derived by
//! folding over an explicit container order; nothing relies on map iteration
//! order.

use crate::errors::RemapError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the new container map: a container and how many tracks it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub track_count: u32,
}

impl ContainerSpec {
    pub fn new(name: impl Into<String>, track_count: u32) -> Self {
        Self {
            name: name.into(),
            track_count,
        }
    }
}

/// The block of global indices owned by one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRange {
    pub name: String,
    pub start_index: u32,
    pub track_count: u32,
}

impl ContainerRange {
    /// One past the last global index owned by this container
    pub fn end_index(&self) -> u64 {
        u64::from(self.start_index) + u64::from(self.track_count)
    }

    /// Whether `index` falls inside this container's block
    pub fn contains(&self, index: u32) -> bool {
        index >= self.start_index && u64::from(index) < self.end_index()
    }
}

/// Ordered, gap-free sequence of container ranges
///
/// Invariant: `ranges[0].start_index == 0` and every following range starts
/// where the previous one ends. Container names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    ranges: Vec<ContainerRange>,
    by_name: HashMap<String, usize>,
}

impl Layout {
    /// Build a layout by assigning start indices as a running sum of track
    /// counts, in the order the specs are given.
    ///
    /// # Errors
    ///
    /// - `DuplicateContainer` if a name appears twice
    /// - `LayoutOverflow` if the total track count does not fit a `u32` index
    pub fn from_track_counts<'a, I>(specs: I) -> Result<Self, RemapError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let (ranges, _) = specs.into_iter().try_fold(
            (Vec::new(), 0u32),
            |(mut ranges, start), (name, track_count)| {
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
                Ok::<_, RemapError>((ranges, next))
            },
        )?;
        Self::from_ranges(ranges)
    }

    /// Wrap ranges that the caller has already laid out contiguously.
    pub(crate) fn from_ranges(ranges: Vec<ContainerRange>) -> Result<Self, RemapError> {
        let mut by_name = HashMap::with_capacity(ranges.len());
        for (position, range) in ranges.iter().enumerate() {
            if by_name.insert(range.name.clone(), position).is_some() {
                return Err(RemapError::DuplicateContainer {
                    name: range.name.clone(),
                });
            }
        }
        Ok(Self { ranges, by_name })
    }

    /// Ranges in enumeration order
    pub fn ranges(&self) -> &[ContainerRange] {
        &self.ranges
    }

    /// Container names in enumeration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ranges.iter().map(|r| r.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ContainerRange> {
        self.by_name.get(name).map(|&position| &self.ranges[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sum of all track counts, i.e. the number of global index slots
    pub fn total_tracks(&self) -> usize {
        self.ranges.iter().map(|r| r.track_count as usize).sum()
    }

    /// The first container, in enumeration order, whose block holds `index`
    pub fn owner_of(&self, index: u32) -> Option<&ContainerRange> {
        self.ranges.iter().find(|r| r.contains(index))
    }
}
