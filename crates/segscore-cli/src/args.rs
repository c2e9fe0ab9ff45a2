//! CLI argument definitions using clap
//!
//! - segscore eval gold.txt              # Score the default segmenter
//! - segscore eval --config run.toml     # Take settings from a file
//! - segscore report results.json        # Re-render a saved report

use clap::{Args, Parser, Subcommand};
use segscore_core::{CorpusFormat, ReportFormat, SegmenterKind};
use std::path::PathBuf;

/// Default configuration file name; a missing file means built-in defaults.
pub const DEFAULT_CONFIG_FILE: &str = "segscore.toml";

#[derive(Parser, Debug)]
#[command(name = "segscore")]
#[command(about = "segscore - span-level precision/recall for tokenizers")]
#[command(
    long_about = r#"segscore - span-level precision/recall for tokenizers

USAGE:
  segscore eval gold.txt                       # Score the simple segmenter
  segscore eval data/ --segmenter whitespace   # Score every corpus file below data/
  segscore eval --config run.toml --workers 4  # Settings from file, four threads
  segscore report segscore_20240101_120000.json --report markdown

Annotated corpora hold one sample per line; whitespace and the split tag
(default <SPLIT>) mark token boundaries.

For detailed help: segscore --help"#
)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (forces debug logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a segmenter against a gold corpus
    Eval(EvalArgs),

    /// Render a saved JSON report
    Report {
        /// Report file written by `segscore eval --output`
        input: PathBuf,

        /// Output format (json, markdown, table)
        #[arg(long, default_value = "table")]
        report: ReportFormat,
    },
}

/// Options for `segscore eval`; flags override the configuration file
#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// Corpus file or directory
    pub corpus: Option<PathBuf>,

    /// Path to configuration file (TOML, YAML or JSON)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Corpus format (annotated, jsonl); inferred from extensions if omitted
    #[arg(long)]
    pub format: Option<CorpusFormat>,

    /// Segmenter to evaluate (whitespace, simple, regex)
    #[arg(long)]
    pub segmenter: Option<SegmenterKind>,

    /// Token pattern for the regex segmenter
    #[arg(long)]
    pub pattern: Option<String>,

    /// Boundary marker inside whitespace-delimited chunks
    #[arg(long)]
    pub split_tag: Option<String>,

    /// Worker threads
    #[arg(long)]
    pub workers: Option<usize>,

    /// Samples per worker per batch
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Output format (json, markdown, table)
    #[arg(long)]
    pub report: Option<ReportFormat>,

    /// Directory to save the JSON report in
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log every misclassified sample
    #[arg(long)]
    pub misclassified: bool,
}
