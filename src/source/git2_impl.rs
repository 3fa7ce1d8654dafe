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

use anyhow::{Context, Result};

use crate::Revision;

use super::LineSource;

/// Reads revisions of a file out of a git repository via `libgit2`.
///
/// Identifiers use git's `<rev>:<path>` blob syntax, e.g. `HEAD~1:src/calc.c`
/// or `v1.0:README`. Construct with [`Git2Source::open`].
pub struct Git2Source {
    inner: git2::Repository,
}

impl Git2Source {
    /// Try to open a git repository by iteratively trying the given path and
    /// its parents until a repository root is found.
    pub fn open(mut path: std::path::PathBuf) -> Result<Self> {
        loop {
            let result = git2::Repository::open(&path);
            if let Ok(repo) = result {
                return Ok(Git2Source { inner: repo });
            }
            if !path.pop() {
                anyhow::bail!("Could not find git repository root");
            }
        }
    }
}

impl LineSource for Git2Source {
    fn load(&self, id: &str) -> Result<Revision> {
        if !id.contains(':') {
            anyhow::bail!("Expected '<rev>:<path>', got '{}'", id);
        }

        let object = self
            .inner
            .revparse_single(id)
            .context(format!("Failed to resolve '{}'", id))?;
        let blob = object
            .peel_to_blob()
            .context(format!("'{}' is not a file", id))?;
        let text = std::str::from_utf8(blob.content())
            .context(format!("'{}' is not valid UTF-8", id))?;

        Ok(Revision::from_text(id, text))
    }
}
