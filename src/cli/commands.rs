//! Command implementations for the Orthovar CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::aggregate::{VariantAggregator, VariantReport};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::OrthovarConfig;
use crate::corpus::{EditMap, PairEnumerator, Vocabulary};
use crate::error::Result;
use crate::spelling::levenshtein::{compute_edit_operations, damerau_levenshtein_distance};
use crate::spelling::template::Template;

/// Execute a CLI command.
pub fn execute_command(args: OrthovarArgs) -> Result<()> {
    let config = args.resolve_config()?;
    match &args.command {
        Command::Edits(edits_args) => build_edits(edits_args, &config),
        Command::Variants(variants_args) => rank_variants(variants_args, &config, &args),
        Command::Run(run_args) => run_pipeline(run_args, &config, &args),
        Command::Align(align_args) => align_words(align_args, &args),
    }
}

/// Build the edit map of a corpus.
fn build_edits(args: &EditsArgs, config: &OrthovarConfig) -> Result<()> {
    let map = scan_corpus(&args.corpus, config)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_edit_map(&map, BufWriter::new(file), args.writeout)?;
            info!("Wrote {} pairs to {}", map.pair_count(), path.display());
        }
        None => write_edit_map(&map, io::stdout().lock(), args.writeout)?,
    }
    Ok(())
}

/// Rank the variants of an edit map file.
fn rank_variants(args: &VariantsArgs, config: &OrthovarConfig, cli_args: &OrthovarArgs) -> Result<()> {
    let map = EditMap::load_from_file(&args.edit_map)
        .with_context(|| format!("failed to load edit map {}", args.edit_map.display()))?;
    info!(
        "Loaded {} pairs for {} words from {}",
        map.pair_count(),
        map.source_count(),
        args.edit_map.display()
    );
    report_variants(&map, &args.aggregation, config, cli_args)
}

/// Scan a corpus and rank its variants in one pass.
fn run_pipeline(args: &RunArgs, config: &OrthovarConfig, cli_args: &OrthovarArgs) -> Result<()> {
    let map = scan_corpus(&args.corpus, config)?;
    report_variants(&map, &args.aggregation, config, cli_args)
}

/// Show how two words align.
fn align_words(args: &AlignArgs, cli_args: &OrthovarArgs) -> Result<()> {
    let ops = compute_edit_operations(&args.source, &args.target);
    let template = Template::build(&ops, &args.source, &args.target)?;
    let distance = damerau_levenshtein_distance(&args.source, &args.target);
    let alignment = AlignmentResult::new(&args.source, &args.target, distance, ops, &template);

    output_alignment(&mut io::stdout().lock(), &alignment, cli_args)
}

fn scan_corpus(path: &Path, config: &OrthovarConfig) -> Result<EditMap> {
    let vocabulary = Vocabulary::load_from_file(path, config.corpus.min_length)
        .with_context(|| format!("failed to read corpus {}", path.display()))?;
    if vocabulary.is_empty() {
        info!(
            "No words of at least {} characters in {}",
            config.corpus.min_length,
            path.display()
        );
    } else {
        info!(
            "Read {} distinct words from {}",
            vocabulary.len(),
            path.display()
        );
    }

    PairEnumerator::new(config.enumerator.clone()).enumerate(vocabulary.words())
}

fn report_variants(
    map: &EditMap,
    args: &AggregationArgs,
    config: &OrthovarConfig,
    cli_args: &OrthovarArgs,
) -> Result<()> {
    let aggregation = VariantAggregator::new(config.aggregator.clone()).aggregate(map)?;
    let report = VariantReport::from_registry(&aggregation.registry, args.limit);

    // Build the whole report before printing so a failure leaves no partial output.
    let mut buffer = Vec::new();
    output_report(&mut buffer, &report, args.examples, cli_args)?;
    io::stdout().lock().write_all(&buffer)?;

    let summary = AggregationSummary::new(&aggregation.stats, aggregation.registry.len());
    output_summary(&mut io::stderr().lock(), &summary, cli_args)
}

fn write_edit_map<W: Write>(map: &EditMap, mut writer: W, writeout: bool) -> Result<()> {
    if writeout {
        map.write_lines(&mut writer)?;
    } else {
        map.write_json(&mut writer)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_edits_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("corpus.txt");
        let output = temp_dir.path().join("edits.json");
        fs::write(&corpus, "colour color\nhonour honor the\n").unwrap();

        let args = OrthovarArgs::try_parse_from([
            "orthovar",
            "edits",
            corpus.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();

        let map = EditMap::load_from_file(&output).unwrap();
        assert!(map.contains_pair("colour", "color"));
        assert!(map.contains_pair("honour", "honor"));
        assert!(map.related("the").is_none());
    }

    #[test]
    fn test_writeout_lines() {
        let mut map = EditMap::new();
        map.insert("cat", "cot", compute_edit_operations("cat", "cot"));

        let mut buffer = Vec::new();
        write_edit_map(&map, &mut buffer, true).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "cat : {\"cot\":[[\"replace\",1,1]]}\n"
        );
    }

    #[test]
    fn test_missing_corpus_is_fatal() {
        let args = OrthovarArgs::try_parse_from(["orthovar", "run", "/nonexistent/corpus.txt"]).unwrap();
        let error = execute_command(args).unwrap_err();
        assert!(error.to_string().contains("failed to read corpus"));
    }

    #[test]
    fn test_corpus_without_long_words_gives_empty_map() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("corpus.txt");
        let output = temp_dir.path().join("edits.json");
        fs::write(&corpus, "a an the\n").unwrap();

        let args = OrthovarArgs::try_parse_from([
            "orthovar",
            "edits",
            corpus.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "{}\n");

        let args = OrthovarArgs::try_parse_from(["orthovar", "run", corpus.to_str().unwrap()]).unwrap();
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_edit_map_with_insertions_is_ranked() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("edits.json");
        fs::write(
            &path,
            r#"{"color":{"colour":[["insert",3,4]]},"nite":{"night":[["insert",1,2],["replace",2,3],["replace",3,4]]}}"#,
        )
        .unwrap();

        let map = EditMap::load_from_file(&path).unwrap();
        let aggregation = VariantAggregator::default().aggregate(&map).unwrap();
        let report = VariantReport::from_registry(&aggregation.registry, None);
        assert_eq!(report.lines(), vec!["(ght/te) : 1", "(u/∅) : 1"]);

        let args = OrthovarArgs::try_parse_from(["orthovar", "variants", path.to_str().unwrap()]).unwrap();
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_unparsable_edit_map_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("edits.json");
        fs::write(&path, r#"{"cat":{"cot":[["replace",1]]}}"#).unwrap();

        let args = OrthovarArgs::try_parse_from(["orthovar", "variants", path.to_str().unwrap()]).unwrap();
        let error = execute_command(args).unwrap_err();
        assert!(error.to_string().contains("failed to load edit map"));
    }
}
