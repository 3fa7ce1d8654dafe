// Line sources: where revisions come from

mod git2_impl;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::Revision;

pub use git2_impl::Git2Source;

/// Supplies the lines of a revision given its identifier.
///
/// Loading happens before the tracker runs; a failure here aborts the run
/// with nothing produced.
pub trait LineSource {
    fn load(&self, id: &str) -> Result<Revision>;
}

/// Reads revisions from plain files. The identifier is a path, resolved
/// against `base` when relative.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    base: Option<PathBuf>,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative identifiers against `base` instead of the working
    /// directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        FsSource {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(id),
            None => PathBuf::from(id),
        }
    }
}

impl LineSource for FsSource {
    fn load(&self, id: &str) -> Result<Revision> {
        let path = self.resolve(id);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Ok(Revision::from_text(id, &text))
    }
}
