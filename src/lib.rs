// Core library for line-tracker

pub mod config;
pub mod mapping;
pub mod normalize;
pub mod output;
pub mod source;
pub mod tracker;
pub mod utils;

pub use config::TrackerConfig;
pub use mapping::{LineMapping, MappingEntry, Status};
pub use tracker::LineTracker;

/// A single line of one revision.
///
/// `index` is 1-based and unique within the revision. `normalized` is always
/// `normalize::normalize(&text)` and is what every matching stage compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
    pub normalized: String,
}

impl Line {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let normalized = normalize::normalize(&text);
        Line {
            index,
            text,
            normalized,
        }
    }
}

/// One version (old or new) of a logical file.
///
/// Lines are numbered `1..=len()` without gaps. A revision is never mutated
/// once built; the tracker only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub id: String,
    lines: Vec<Line>,
}

impl Revision {
    /// Build a revision from raw lines in file order.
    pub fn from_lines<I, S>(id: impl Into<String>, raw_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = raw_lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line::new(i + 1, text))
            .collect();
        Revision {
            id: id.into(),
            lines,
        }
    }

    /// Build a revision from a whole text blob.
    ///
    /// Splits on `\n`, `\r\n` and a lone `\r`. A final line terminator does
    /// not produce a trailing empty line.
    pub fn from_text(id: impl Into<String>, text: &str) -> Self {
        let mut raw_lines = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            match rest.find(|c: char| c == '\n' || c == '\r') {
                Some(pos) => {
                    raw_lines.push(&rest[..pos]);
                    let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                    rest = &rest[pos + terminator..];
                }
                None => {
                    raw_lines.push(rest);
                    break;
                }
            }
        }
        Self::from_lines(id, raw_lines)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by its 1-based index.
    pub fn line(&self, index: usize) -> Option<&Line> {
        index.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Indexing for callers that already hold a valid 1-based index.
    pub(crate) fn at(&self, index: usize) -> &Line {
        &self.lines[index - 1]
    }
}

/// Track every line of `old` into `new` using the default configuration.
pub fn track_lines(old: &Revision, new: &Revision) -> LineMapping {
    LineTracker::default().track(old, new)
}
