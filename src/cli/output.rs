//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregationStats, VariantReport};
use crate::cli::args::{OrthovarArgs, OutputFormat};
use crate::error::Result;
use crate::spelling::operation::EditOperation;
use crate::spelling::template::Template;

/// Everything `align` reports about one word pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub source: String,
    pub target: String,
    pub distance: usize,
    pub operations: Vec<EditOperation>,
    pub codes: String,
    pub before: String,
    pub after: String,
    /// Canonical key of the single edited span, if there is one.
    pub variant: Option<String>,
}

impl AlignmentResult {
    pub fn new(
        source: &str,
        target: &str,
        distance: usize,
        operations: Vec<EditOperation>,
        template: &Template,
    ) -> Self {
        let (codes, before, after) = template.render();
        let variant = template
            .classify()
            .map(|classification| classification.variant.canonical_key());
        AlignmentResult {
            source: source.to_string(),
            target: target.to_string(),
            distance,
            operations,
            codes,
            before,
            after,
            variant,
        }
    }
}

/// Summary printed after aggregation in verbose mode.
#[derive(Debug, Serialize, Deserialize)]
pub struct AggregationSummary {
    pub pairs: usize,
    pub classified: usize,
    pub rejected: usize,
    pub malformed: usize,
    pub variants: usize,
}

impl AggregationSummary {
    pub fn new(stats: &AggregationStats, variants: usize) -> Self {
        AggregationSummary {
            pairs: stats.pairs,
            classified: stats.classified,
            rejected: stats.rejected,
            malformed: stats.malformed,
            variants,
        }
    }
}

/// Write a ranked report in the requested format.
pub fn output_report<W: Write>(
    writer: &mut W,
    report: &VariantReport,
    show_examples: bool,
    args: &OrthovarArgs,
) -> Result<()> {
    if show_examples {
        writeln!(writer, "{}", report.examples_json(args.pretty)?)?;
    }

    match args.output_format {
        OutputFormat::Human => report.write_lines(&mut *writer)?,
        OutputFormat::Json => writeln!(writer, "{}", report.counts_json(args.pretty)?)?,
    }
    Ok(())
}

/// Write an alignment in the requested format.
pub fn output_alignment<W: Write>(
    writer: &mut W,
    alignment: &AlignmentResult,
    args: &OrthovarArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(alignment)?
            } else {
                serde_json::to_string(alignment)?
            };
            writeln!(writer, "{json}")?;
        }
        OutputFormat::Human => {
            writeln!(writer, "{} -> {}", alignment.source, alignment.target)?;
            writeln!(writer, "Distance: {}", alignment.distance)?;
            let operations = alignment
                .operations
                .iter()
                .map(EditOperation::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(writer, "Operations: [{operations}]")?;
            writeln!(writer, "Codes:  {}", alignment.codes)?;
            writeln!(writer, "Before: {}", alignment.before)?;
            writeln!(writer, "After:  {}", alignment.after)?;
            match &alignment.variant {
                Some(key) => writeln!(writer, "Variant: ({key})")?,
                None => writeln!(writer, "Variant: none (not a single span)")?,
            }
        }
    }
    Ok(())
}

/// Write the aggregation summary in verbose mode.
pub fn output_summary<W: Write>(
    writer: &mut W,
    summary: &AggregationSummary,
    args: &OrthovarArgs,
) -> Result<()> {
    if args.verbosity() < 2 {
        return Ok(());
    }
    writeln!(
        writer,
        "Pairs: {}, classified: {}, multi-span: {}, malformed: {}, variants: {}",
        summary.pairs, summary.classified, summary.rejected, summary.malformed, summary.variants
    )?;
    Ok(())
}
