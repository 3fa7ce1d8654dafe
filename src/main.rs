// Command-line entry point

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use line_tracker::{
    output::{self, OutputFormat},
    source::{FsSource, Git2Source, LineSource},
    LineTracker, TrackerConfig,
};

/// Track where every line of an old file version ended up in a new one.
///
/// Prints one record per old line: `OLD NEW`, where NEW is -1 for a deleted
/// line. New lines that no record points at were inserted.
#[derive(Parser)]
#[command(name = "ltrack")]
struct Cli {
    /// Old revision: a file path, or `<rev>:<path>` with --repo.
    old: String,

    /// New revision: a file path, or `<rev>:<path>` with --repo.
    new: String,

    /// Read revisions from this git repository instead of the filesystem.
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Write the mapping here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append the status label to each record.
    #[arg(long)]
    labels: bool,

    /// Also write split groups (`OLD NEW1 NEW2 ...`) to this file.
    #[arg(long)]
    splits: Option<PathBuf>,

    /// Candidate window radius around each old line.
    #[arg(long, default_value_t = 15)]
    window: usize,

    /// Consider every windowed line, not only those sharing a token.
    #[arg(long)]
    no_token_filter: bool,

    /// Context radius for neighbourhood similarity.
    #[arg(long, default_value_t = 2)]
    context: usize,

    /// Weight of content similarity in the combined score.
    #[arg(long, default_value_t = 0.6)]
    content_weight: f64,

    /// Weight of context similarity in the combined score.
    #[arg(long, default_value_t = 0.4)]
    context_weight: f64,

    /// Minimum combined score to accept a match.
    #[arg(long, default_value_t = 0.6)]
    threshold: f64,

    /// Score at or above which a match counts as a minor modification.
    #[arg(long, default_value_t = 0.9)]
    minor_threshold: f64,

    /// Skip split refinement.
    #[arg(long)]
    no_split: bool,

    /// Maximum number of extra new lines a split may span.
    #[arg(long, default_value_t = 3)]
    max_split: usize,
}

impl Cli {
    fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::default()
            .with_window_radius(self.window)
            .with_token_filter(!self.no_token_filter)
            .with_context_radius(self.context)
            .with_weights(self.content_weight, self.context_weight)
            .with_accept_threshold(self.threshold)
            .with_minor_threshold(self.minor_threshold)
            .with_split_refinement(!self.no_split)
            .with_max_split_length(self.max_split)
    }

    fn format(&self) -> OutputFormat {
        if self.labels {
            OutputFormat::Labeled
        } else {
            OutputFormat::Canonical
        }
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Failed to create '{}'", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(writer)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration errors surface before any input is read
    let tracker = LineTracker::new(cli.tracker_config())?;

    let source: Box<dyn LineSource> = match &cli.repo {
        Some(path) => Box::new(Git2Source::open(path.clone())?),
        None => Box::new(FsSource::new()),
    };
    let old = source.load(&cli.old)?;
    let new = source.load(&cli.new)?;

    let mapping = tracker.track(&old, &new);

    let mut out = open_output(cli.output.as_deref())?;
    output::write_mapping(&mut out, &mapping, cli.format())?;

    if let Some(path) = &cli.splits {
        let mut splits = open_output(Some(path))?;
        output::write_split_groups(&mut splits, &mapping)?;
    }

    Ok(())
}
