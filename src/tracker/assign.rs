// Copyright 2026 Thomas Johannesson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// === Greedy assignment and split refinement ===
//
// Turns scored candidate pairs into one outcome per old line:
//
// - Pairs are ranked by score, best first, with (old, new) ascending as the
//   tie-break so the walk below is reproducible.
// - The ranked list is walked once. A pair is accepted when it clears the
//   threshold and neither of its lines is taken yet. The first pair under
//   the threshold ends the walk.
// - Every old line left over is deleted.
// - Split refinement then looks at each accepted pair and records whether the
//   old line is better explained by a short run of consecutive new lines.
//
// This is greedy, not a maximum-weight bipartite matching.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::config::TrackerConfig;
use crate::mapping::{LineMapping, MappingEntry, Status};
use crate::{Line, Revision};

use super::similarity::run_similarity;

/// A candidate pair with its combined similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoredPair {
    pub(crate) old_index: usize,
    pub(crate) new_index: usize,
    pub(crate) score: f64,
}

/// Score descending, then old index ascending, then new index ascending.
fn rank_order(a: &ScoredPair, b: &ScoredPair) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.old_index.cmp(&b.old_index))
        .then(a.new_index.cmp(&b.new_index))
}

pub(crate) fn rank(pairs: &mut [ScoredPair]) {
    pairs.sort_by(rank_order);
}

/// Mutable state of one assignment walk. Owned by [`assign`] alone and
/// consumed by [`Assignment::freeze`].
struct Assignment<'a> {
    unchanged: &'a BTreeMap<usize, usize>,
    /// Fuzzy matches: old index → (new index, accepted score).
    bound: BTreeMap<usize, (usize, f64)>,
    consumed: HashSet<usize>,
}

impl<'a> Assignment<'a> {
    fn new(unchanged: &'a BTreeMap<usize, usize>) -> Self {
        Assignment {
            unchanged,
            bound: BTreeMap::new(),
            consumed: unchanged.values().copied().collect(),
        }
    }

    fn is_old_taken(&self, old_index: usize) -> bool {
        self.unchanged.contains_key(&old_index) || self.bound.contains_key(&old_index)
    }

    /// Walk ranked pairs once, accepting greedily.
    fn accept(&mut self, ranked: &[ScoredPair], threshold: f64) {
        for pair in ranked {
            if pair.score < threshold {
                break;
            }
            if self.is_old_taken(pair.old_index) || self.consumed.contains(&pair.new_index) {
                continue;
            }
            self.bound
                .insert(pair.old_index, (pair.new_index, pair.score));
            self.consumed.insert(pair.new_index);
        }
    }

    fn entry(&self, old_index: usize, minor_threshold: f64) -> MappingEntry {
        let (new_index, status, score) = if let Some(&n) = self.unchanged.get(&old_index) {
            (Some(n), Status::Unchanged, 1.0)
        } else if let Some(&(n, score)) = self.bound.get(&old_index) {
            let status = if score >= minor_threshold {
                Status::ModifiedMinor
            } else {
                Status::Modified
            };
            (Some(n), status, score)
        } else {
            (None, Status::Deleted, 0.0)
        };

        MappingEntry {
            old_index,
            new_index,
            status,
            score,
        }
    }

    fn freeze(self, old: &Revision, new: &Revision, config: &TrackerConfig) -> LineMapping {
        let entries = (1..=old.len())
            .map(|i| self.entry(i, config.minor_threshold))
            .collect();

        let split_groups = if config.split_refinement {
            self.bound
                .iter()
                .filter_map(|(&old_index, &(new_index, _))| {
                    split_run(old.at(old_index), new, new_index, config.max_split_length)
                        .map(|run| (old_index, run))
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        LineMapping::new(entries, split_groups, new.len())
    }
}

/// Greedily accept scored pairs and classify every old line.
///
/// `unchanged` holds the exact matches; those lines are `Unchanged` and their
/// new lines are unavailable to fuzzy matching. `pairs` may arrive in any
/// order; they are ranked here.
pub(crate) fn assign(
    old: &Revision,
    new: &Revision,
    unchanged: &BTreeMap<usize, usize>,
    mut pairs: Vec<ScoredPair>,
    config: &TrackerConfig,
) -> LineMapping {
    rank(&mut pairs);

    let mut assignment = Assignment::new(unchanged);
    assignment.accept(&pairs, config.accept_threshold);
    assignment.freeze(old, new, config)
}

/// Extend a match at `start` over following new lines while that strictly
/// improves the token Jaccard against the old line.
///
/// At most `max_extra` lines are added and the run never passes the end of
/// the revision. Returns the run only when it covers two or more lines.
pub(crate) fn split_run(
    old_line: &Line,
    new: &Revision,
    start: usize,
    max_extra: usize,
) -> Option<Vec<usize>> {
    let last = start.saturating_add(max_extra).min(new.len());

    let mut run: Vec<&Line> = vec![new.at(start)];
    let mut best = run_similarity(old_line, &run);
    let mut best_end = start;

    for next in (start + 1)..=last {
        run.push(new.at(next));
        let score = run_similarity(old_line, &run);
        if score > best {
            best = score;
            best_end = next;
        } else {
            break;
        }
    }

    (best_end > start).then(|| (start..=best_end).collect())
}
