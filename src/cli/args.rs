//! Command line argument parsing for the Orthovar CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{OrthovarConfig, ValidationMode};
use crate::error::Result;

/// Orthovar - spelling variant analysis for word corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "orthovar")]
#[command(about = "Find and rank recurring spelling alternations in a corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct OrthovarArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE", env = "ORTHOVAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl OrthovarArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The configuration file (or defaults) with this invocation's flags applied.
    pub fn resolve_config(&self) -> Result<OrthovarConfig> {
        let mut config = match &self.config {
            Some(path) => OrthovarConfig::load_from_file(path)?,
            None => OrthovarConfig::default(),
        };

        match &self.command {
            Command::Edits(args) => {
                args.scan.apply(&mut config);
            }
            Command::Variants(args) => {
                args.aggregation.apply(&mut config);
            }
            Command::Run(args) => {
                args.scan.apply(&mut config);
                args.aggregation.apply(&mut config);
            }
            Command::Align(_) => {}
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the edit map of a corpus
    Edits(EditsArgs),

    /// Rank the spelling variants of an edit map
    Variants(VariantsArgs),

    /// Build the edit map of a corpus and rank its variants
    Run(RunArgs),

    /// Show the operations and template relating two words
    Align(AlignArgs),
}

/// Corpus scanning flags shared by `edits` and `run`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Minimum word length, in characters
    #[arg(short = 'm', long)]
    pub min_length: Option<usize>,

    /// Maximum edit distance recorded (at most 3)
    #[arg(long)]
    pub max_distance: Option<usize>,

    /// Maximum length difference of compared words
    #[arg(long)]
    pub max_length_difference: Option<usize>,

    /// Compare word pairs in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of threads to use
    #[arg(short, long)]
    pub threads: Option<usize>,
}

impl ScanArgs {
    fn apply(&self, config: &mut OrthovarConfig) {
        if let Some(min_length) = self.min_length {
            config.corpus.min_length = min_length;
        }
        if let Some(max_distance) = self.max_distance {
            config.enumerator.max_distance = max_distance;
        }
        if let Some(difference) = self.max_length_difference {
            config.enumerator.max_length_difference = difference;
        }
        if self.parallel {
            config.enumerator.parallel = true;
        }
        if self.threads.is_some() {
            config.enumerator.thread_pool_size = self.threads;
        }
    }
}

/// Aggregation flags shared by `variants` and `run`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct AggregationArgs {
    /// Abort on the first malformed operation record
    #[arg(long)]
    pub strict: bool,

    /// Classify pairs in parallel
    #[arg(id = "parallel_aggregation", long = "parallel-aggregation")]
    pub parallel: bool,

    /// Also print the example word pairs of every variant
    #[arg(long)]
    pub examples: bool,

    /// Maximum number of variants to report
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl AggregationArgs {
    fn apply(&self, config: &mut OrthovarConfig) {
        if self.strict {
            config.aggregator.validation = ValidationMode::Strict;
        }
        if self.parallel {
            config.aggregator.parallel = true;
        }
    }
}

/// Arguments for building an edit map
#[derive(Parser, Debug, Clone)]
pub struct EditsArgs {
    /// Plain-text corpus file
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Write one `word : {related}` line per word instead of JSON
    #[arg(long)]
    pub writeout: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for ranking variants
#[derive(Parser, Debug, Clone)]
pub struct VariantsArgs {
    /// Edit map file (JSON)
    #[arg(value_name = "EDIT_MAP")]
    pub edit_map: PathBuf,

    #[command(flatten)]
    pub aggregation: AggregationArgs,
}

/// Arguments for the full pipeline
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Plain-text corpus file
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub aggregation: AggregationArgs,
}

/// Arguments for aligning two words
#[derive(Parser, Debug, Clone)]
pub struct AlignArgs {
    /// Source word
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Target word
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
