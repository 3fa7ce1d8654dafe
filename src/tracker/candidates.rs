// Windowed candidate generation for changed lines

use std::collections::{BTreeMap, BTreeSet};

use crate::normalize::tokenize;
use crate::Revision;

/// Old index → ascending new indices worth scoring against it.
pub(crate) type CandidateSet = BTreeMap<usize, Vec<usize>>;

/// Inclusive new-index window `[max(1, i - radius), min(new_len, i + radius)]`.
///
/// Empty (start > end) when the old index lies further than `radius` past the
/// end of the new revision.
pub(crate) fn window(old_index: usize, radius: usize, new_len: usize) -> (usize, usize) {
    let start = old_index.saturating_sub(radius).max(1);
    let end = old_index.saturating_add(radius).min(new_len);
    (start, end)
}

/// Propose nearby new lines for every old line exact matching left behind.
///
/// Only new lines still unused after exact matching are considered. With
/// `token_filter` set, a new line must also share at least one token with the
/// old line; this is a coarse pre-filter, scoring happens later. Every index
/// in `unmatched_old` gets an entry, possibly empty.
pub(crate) fn generate(
    old: &Revision,
    new: &Revision,
    unmatched_old: &BTreeSet<usize>,
    unused_new: &BTreeSet<usize>,
    radius: usize,
    token_filter: bool,
) -> CandidateSet {
    let mut candidates = CandidateSet::new();

    for &old_index in unmatched_old {
        let old_tokens = tokenize(&old.at(old_index).normalized);
        let (start, end) = window(old_index, radius, new.len());

        let list: Vec<usize> = if start > end {
            Vec::new()
        } else {
            unused_new
                .range(start..=end)
                .copied()
                .filter(|&n| {
                    !token_filter || !old_tokens.is_disjoint(&tokenize(&new.at(n).normalized))
                })
                .collect()
        };

        candidates.insert(old_index, list);
    }

    candidates
}
