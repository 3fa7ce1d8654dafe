// Plain-text rendering of a line mapping

use std::io::Write;

use anyhow::{Context, Result};

use crate::mapping::LineMapping;

/// Record layout for [`write_mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `old new`, with `new` as `-1` for deleted lines.
    #[default]
    Canonical,
    /// `old new status`.
    Labeled,
}

/// Write one record per old line, in ascending old-index order.
///
/// Inserted lines get no record; readers recover them as the new indices
/// that never appear.
pub fn write_mapping<W: Write>(
    out: &mut W,
    mapping: &LineMapping,
    format: OutputFormat,
) -> Result<()> {
    for entry in mapping.entries() {
        let new_index = entry.new_index.map_or(-1, |n| n as i64);
        let written = match format {
            OutputFormat::Canonical => writeln!(out, "{} {}", entry.old_index, new_index),
            OutputFormat::Labeled => {
                writeln!(out, "{} {} {}", entry.old_index, new_index, entry.status)
            }
        };
        written.context("Failed to write mapping")?;
    }
    out.flush().context("Failed to write mapping")?;
    Ok(())
}

/// Write split groups as `old new1 new2 ...`, one group per line.
pub fn write_split_groups<W: Write>(out: &mut W, mapping: &LineMapping) -> Result<()> {
    for (old_index, run) in mapping.split_groups() {
        let members: Vec<String> = run.iter().map(|n| n.to_string()).collect();
        writeln!(out, "{} {}", old_index, members.join(" "))
            .context("Failed to write split groups")?;
    }
    out.flush().context("Failed to write split groups")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineTracker, Revision, TrackerConfig};

    fn render(mapping: &LineMapping, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_mapping(&mut buf, mapping, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> LineMapping {
        let old = Revision::from_lines("old", ["keep", "a b c", "gone entirely"]);
        let new = Revision::from_lines("new", ["keep", "a", "b", "c"]);
        let config = TrackerConfig::default()
            .with_weights(1.0, 0.0)
            .with_accept_threshold(0.3);
        LineTracker::new(config).unwrap().track(&old, &new)
    }

    #[test]
    fn canonical_format() {
        assert_eq!(render(&sample(), OutputFormat::Canonical), "1 1\n2 2\n3 -1\n");
    }

    #[test]
    fn labeled_format() {
        assert_eq!(
            render(&sample(), OutputFormat::Labeled),
            "1 1 unchanged\n2 2 modified\n3 -1 deleted\n"
        );
    }

    #[test]
    fn split_groups_format() {
        let mut buf = Vec::new();
        write_split_groups(&mut buf, &sample()).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "2 2 3 4\n");
    }

    #[test]
    fn empty_mapping_writes_nothing() {
        let empty = Revision::from_lines("old", Vec::<String>::new());
        let mapping = LineTracker::default().track(&empty, &empty);

        assert_eq!(render(&mapping, OutputFormat::Labeled), "");
    }
}
