//! Two-pointer walk over a pair of sorted listings
//!
//! Both listings must be sorted with [`sort_entries`](dirmirror_types::sort_entries).
//! The walk advances whichever side holds the smaller name, or both sides
//! when the names match, so every name from either listing is produced
//! exactly once.

use dirmirror_types::Entry;
use std::cmp::Ordering;

/// One step of the merge walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep<'a> {
    /// Name present only in the source listing
    SourceOnly(&'a Entry),
    /// Name present only in the destination listing
    DestinationOnly(&'a Entry),
    /// Name present in both listings
    Both(&'a Entry, &'a Entry),
}

impl<'a> MergeStep<'a> {
    /// Name this step refers to
    pub fn name(&self) -> &'a std::ffi::OsStr {
        match self {
            Self::SourceOnly(entry) | Self::DestinationOnly(entry) | Self::Both(entry, _) => {
                entry.name()
            }
        }
    }
}

/// Iterator yielding the [`MergeStep`]s of two sorted listings
#[derive(Debug, Clone)]
pub struct MergeWalk<'a> {
    sources: &'a [Entry],
    destinations: &'a [Entry],
    source_index: usize,
    dest_index: usize,
}

impl<'a> MergeWalk<'a> {
    /// Start a walk over two sorted listings
    pub fn new(sources: &'a [Entry], destinations: &'a [Entry]) -> Self {
        Self {
            sources,
            destinations,
            source_index: 0,
            dest_index: 0,
        }
    }
}

impl<'a> Iterator for MergeWalk<'a> {
    type Item = MergeStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.sources.get(self.source_index);
        let dest = self.destinations.get(self.dest_index);

        let order = match (source, dest) {
            (Some(source), Some(dest)) => source.name.cmp(&dest.name),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return None,
        };

        match (order, source, dest) {
            (Ordering::Less, Some(source), _) => {
                self.source_index += 1;
                Some(MergeStep::SourceOnly(source))
            }
            (Ordering::Greater, _, Some(dest)) => {
                self.dest_index += 1;
                Some(MergeStep::DestinationOnly(dest))
            }
            (Ordering::Equal, Some(source), Some(dest)) => {
                self.source_index += 1;
                self.dest_index += 1;
                Some(MergeStep::Both(source, dest))
            }
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let sources = self.sources.len() - self.source_index;
        let destinations = self.destinations.len() - self.dest_index;
        (sources.max(destinations), Some(sources + destinations))
    }
}
