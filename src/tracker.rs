// Tracker: the line matching pipeline

mod assign;
mod candidates;
mod exact;
pub mod similarity;

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::TrackerConfig;
use crate::mapping::{LineMapping, Status};
use crate::utils::debug_log;
use crate::Revision;

use assign::ScoredPair;
use candidates::CandidateSet;
use similarity::SimilarityScorer;

/// Runs the matching pipeline with a validated configuration.
///
/// Stages, in order:
///
/// 1. exact matching on normalized text (unbounded distance)
/// 2. candidate generation inside a window around each remaining old line
/// 3. similarity scoring of every candidate pair
/// 4. greedy assignment above the acceptance threshold
/// 5. split refinement of accepted pairs (optional)
///
/// A tracker holds no per-run state, so one instance can serve any number of
/// runs, including concurrent ones.
#[derive(Debug, Clone)]
pub struct LineTracker {
    config: TrackerConfig,
    scorer: SimilarityScorer,
}

impl LineTracker {
    /// Create a tracker, rejecting an invalid configuration.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate().context("Invalid tracker configuration")?;
        let scorer = SimilarityScorer::from_config(&config);
        Ok(LineTracker { config, scorer })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Map every line of `old` to its fate in `new`.
    ///
    /// Always returns exactly one entry per old line. An empty `old` gives an
    /// empty mapping; an empty `new` marks every old line deleted.
    pub fn track(&self, old: &Revision, new: &Revision) -> LineMapping {
        let unchanged = exact::match_unchanged(old, new);
        debug_log(&format!(
            "{} -> {}: {} of {} old lines unchanged",
            old.id,
            new.id,
            unchanged.len(),
            old.len()
        ));

        let unmatched_old: BTreeSet<usize> = (1..=old.len())
            .filter(|i| !unchanged.contains_key(i))
            .collect();
        let used_new: BTreeSet<usize> = unchanged.values().copied().collect();
        let unused_new: BTreeSet<usize> = (1..=new.len())
            .filter(|i| !used_new.contains(i))
            .collect();

        let candidates = candidates::generate(
            old,
            new,
            &unmatched_old,
            &unused_new,
            self.config.window_radius,
            self.config.token_filter,
        );

        let pairs = self.score_candidates(old, new, &candidates);
        debug_log(&format!(
            "{} candidate pairs for {} unmatched old lines",
            pairs.len(),
            unmatched_old.len()
        ));

        let mapping = assign::assign(old, new, &unchanged, pairs, &self.config);
        debug_log(&format!(
            "accepted {} modified ({} minor), {} deleted, {} split groups",
            mapping.count(Status::Modified) + mapping.count(Status::ModifiedMinor),
            mapping.count(Status::ModifiedMinor),
            mapping.count(Status::Deleted),
            mapping.split_groups().len()
        ));

        mapping
    }

    /// Score every candidate pair.
    ///
    /// Scoring is pure, so it runs in parallel; the order of the returned
    /// pairs does not matter because assignment ranks them with a total order.
    fn score_candidates(
        &self,
        old: &Revision,
        new: &Revision,
        candidates: &CandidateSet,
    ) -> Vec<ScoredPair> {
        candidates
            .par_iter()
            .flat_map_iter(|(&old_index, new_indices)| {
                new_indices.iter().map(move |&new_index| ScoredPair {
                    old_index,
                    new_index,
                    score: self
                        .scorer
                        .combined_similarity(old, old_index, new, new_index),
                })
            })
            .collect()
    }
}

impl Default for LineTracker {
    fn default() -> Self {
        let config = TrackerConfig::default();
        let scorer = SimilarityScorer::from_config(&config);
        LineTracker { config, scorer }
    }
}
