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

// Similarity scoring of candidate line pairs

use std::collections::HashSet;

use crate::config::TrackerConfig;
use crate::normalize::{jaccard, tokenize};
use crate::{Line, Revision};

/// Scores (old, new) line pairs. All scores lie in `[0, 1]`.
///
/// Content similarity looks at the two lines alone; context similarity looks
/// at the `context_radius` lines around each of them. The combined score is a
/// fixed weighted sum of the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    pub context_radius: usize,
    pub content_weight: f64,
    pub context_weight: f64,
}

impl SimilarityScorer {
    pub fn new(context_radius: usize, content_weight: f64, context_weight: f64) -> Self {
        Self {
            context_radius,
            content_weight,
            context_weight,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(
            config.context_radius,
            config.content_weight,
            config.context_weight,
        )
    }

    /// Jaccard index of the two lines' token sets.
    pub fn content_similarity(&self, a: &Line, b: &Line) -> f64 {
        jaccard(&tokenize(&a.normalized), &tokenize(&b.normalized))
    }

    /// Jaccard index of the token sets pooled over each line's neighbourhood.
    ///
    /// Neighbourhoods are clamped to their own revision, so lines near either
    /// end have a smaller context.
    pub fn context_similarity(
        &self,
        old: &Revision,
        old_index: usize,
        new: &Revision,
        new_index: usize,
    ) -> f64 {
        jaccard(
            &self.context_tokens(old, old_index),
            &self.context_tokens(new, new_index),
        )
    }

    pub fn combined_similarity(
        &self,
        old: &Revision,
        old_index: usize,
        new: &Revision,
        new_index: usize,
    ) -> f64 {
        let content = self.content_similarity(old.at(old_index), new.at(new_index));
        let context = self.context_similarity(old, old_index, new, new_index);
        self.content_weight * content + self.context_weight * context
    }

    fn context_tokens<'a>(&self, rev: &'a Revision, center: usize) -> HashSet<&'a str> {
        let start = center.saturating_sub(self.context_radius).max(1);
        let end = center.saturating_add(self.context_radius).min(rev.len());
        (start..=end)
            .flat_map(|i| tokenize(&rev.at(i).normalized))
            .collect()
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::from_config(&TrackerConfig::default())
    }
}

/// Token Jaccard of an old line against several new lines joined by spaces.
///
/// Used by split refinement to check whether absorbing one more new line
/// brings the run closer to the old line.
pub(crate) fn run_similarity(old: &Line, run: &[&Line]) -> f64 {
    let joined = run
        .iter()
        .map(|l| l.normalized.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    jaccard(&tokenize(&old.normalized), &tokenize(&joined))
}
