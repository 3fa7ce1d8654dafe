// Tunable parameters of the matching pipeline

use anyhow::{bail, Result};

/// Parameters for one tracking run.
///
/// Every field is independently tunable. Values are checked once by
/// [`TrackerConfig::validate`] (called from `LineTracker::new`); the pipeline
/// itself assumes a valid configuration and never clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Candidate window radius `W` around the old line's index.
    pub window_radius: usize,
    /// Require at least one shared token before a pair becomes a candidate.
    pub token_filter: bool,
    /// Neighbourhood radius `C` used for context similarity.
    pub context_radius: usize,
    pub content_weight: f64,
    pub context_weight: f64,
    /// Minimum combined score for a pair to be accepted.
    pub accept_threshold: f64,
    /// Accepted pairs at or above this score are `modified-minor`.
    pub minor_threshold: f64,
    pub split_refinement: bool,
    /// Maximum number of extra new lines a split run may absorb.
    pub max_split_length: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            window_radius: 15,
            token_filter: true,
            context_radius: 2,
            content_weight: 0.6,
            context_weight: 0.4,
            accept_threshold: 0.6,
            minor_threshold: 0.9,
            split_refinement: true,
            max_split_length: 3,
        }
    }
}

impl TrackerConfig {
    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn with_token_filter(mut self, enabled: bool) -> Self {
        self.token_filter = enabled;
        self
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_weights(mut self, content: f64, context: f64) -> Self {
        self.content_weight = content;
        self.context_weight = context;
        self
    }

    pub fn with_accept_threshold(mut self, threshold: f64) -> Self {
        self.accept_threshold = threshold;
        self
    }

    pub fn with_minor_threshold(mut self, threshold: f64) -> Self {
        self.minor_threshold = threshold;
        self
    }

    pub fn with_split_refinement(mut self, enabled: bool) -> Self {
        self.split_refinement = enabled;
        self
    }

    pub fn with_max_split_length(mut self, length: usize) -> Self {
        self.max_split_length = length;
        self
    }

    /// Reject values that would take scores or thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_unit("accept threshold", self.accept_threshold)?;
        check_unit("minor-change threshold", self.minor_threshold)?;
        check_unit("content weight", self.content_weight)?;
        check_unit("context weight", self.context_weight)?;

        let total = self.content_weight + self.context_weight;
        if total == 0.0 {
            bail!("content and context weights cannot both be zero");
        }
        // Small slack so 0.6 + 0.4 style pairs are not rejected by rounding
        if total > 1.0 + 1e-9 {
            bail!(
                "content weight {} and context weight {} sum to {}, which exceeds 1",
                self.content_weight,
                self.context_weight,
                total
            );
        }
        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("{} must be within [0, 1], got {}", name, value);
    }
    Ok(())
}
