// Per-line outcomes of a tracking run

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Fate of one old line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Identical normalized text found in the new revision.
    Unchanged,
    /// Fuzzy match accepted below the minor-change cutoff.
    Modified,
    /// Fuzzy match accepted at or above the minor-change cutoff.
    ModifiedMinor,
    /// No acceptable counterpart in the new revision.
    Deleted,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Unchanged => "unchanged",
            Status::Modified => "modified",
            Status::ModifiedMinor => "modified-minor",
            Status::Deleted => "deleted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where one old line ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    /// 1-based index in the old revision.
    pub old_index: usize,
    /// 1-based index in the new revision, `None` when deleted.
    pub new_index: Option<usize>,
    pub status: Status,
    /// 1.0 for unchanged lines, the accepted combined score for modified
    /// lines, 0.0 for deleted lines.
    pub score: f64,
}

/// Frozen result of a tracking run.
///
/// Holds exactly one [`MappingEntry`] per old line, ordered by old index,
/// plus the split groups found by split refinement. Split groups are extra
/// detail only: they never change an entry's `new_index` or `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMapping {
    entries: Vec<MappingEntry>,
    split_groups: BTreeMap<usize, Vec<usize>>,
    new_len: usize,
}

impl LineMapping {
    pub(crate) fn new(
        entries: Vec<MappingEntry>,
        split_groups: BTreeMap<usize, Vec<usize>>,
        new_len: usize,
    ) -> Self {
        debug_assert!(entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.old_index == i + 1));
        LineMapping {
            entries,
            split_groups,
            new_len,
        }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Outcome for a 1-based old index.
    pub fn entry(&self, old_index: usize) -> Option<&MappingEntry> {
        old_index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Old index → contiguous run of new indices the old line was split
    /// across. Only runs of two or more lines are recorded.
    pub fn split_groups(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.split_groups
    }

    pub fn split_group(&self, old_index: usize) -> Option<&[usize]> {
        self.split_groups.get(&old_index).map(Vec::as_slice)
    }

    /// New indices no outcome points at, i.e. the pure insertions.
    pub fn inserted_lines(&self) -> Vec<usize> {
        let referenced: BTreeSet<usize> =
            self.entries.iter().filter_map(|e| e.new_index).collect();
        (1..=self.new_len)
            .filter(|i| !referenced.contains(i))
            .collect()
    }

    pub fn count(&self, status: Status) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

impl fmt::Display for LineMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let new_index = entry.new_index.map_or(-1, |n| n as i64);
            writeln!(f, "{} {} {}", entry.old_index, new_index, entry.status)?;
        }
        Ok(())
    }
}
