//! Evaluation command: score a segmenter against a gold corpus

use std::time::Instant;

use anyhow::{Context, Result, bail};
use segscore_core::{
    CorpusLoader, EvalConfig, EvalReport, EvaluationMonitor, MisclassificationLogger,
    ParallelEvaluator, SegmentationEvaluator, SegmenterKind, TokenSample, generate_report,
};

use crate::args::EvalArgs;
use crate::console::{CliConsole, colored_score};
use crate::progress::ProgressMonitor;

/// Run an evaluation and print its report
pub fn run(args: &EvalArgs, config: EvalConfig, console: &CliConsole) -> Result<()> {
    let config = apply_overrides(config, args);
    config.validate()?;
    tracing::debug!(?config, "Resolved evaluation config");

    let report = evaluate(&config, console)?;

    println!("{}", generate_report(&report, config.report_format)?);

    if let Some(dir) = &config.output_dir {
        let path = report.save(dir)?;
        console.success(&format!("Report saved to {}", path.display()));
    }

    console.success(&format!(
        "Evaluation complete: F-measure {} over {} samples",
        colored_score(report.fmeasure),
        report.outcomes.total()
    ));
    Ok(())
}

/// Command-line flags take precedence over file values
fn apply_overrides(mut config: EvalConfig, args: &EvalArgs) -> EvalConfig {
    if let Some(corpus) = &args.corpus {
        config.corpus = Some(corpus.clone());
    }
    if let Some(format) = args.format {
        config.format = Some(format);
    }
    if let Some(segmenter) = args.segmenter {
        config.segmenter = segmenter;
    }
    if let Some(pattern) = &args.pattern {
        config.pattern = Some(pattern.clone());
    }
    if let Some(split_tag) = &args.split_tag {
        config.split_tag = split_tag.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(report) = args.report {
        config.report_format = report;
    }
    if let Some(output) = &args.output {
        config.output_dir = Some(output.clone());
    }
    if args.misclassified {
        config.log_misclassified = true;
    }
    config
}

fn segmenter_label(config: &EvalConfig) -> String {
    match (config.segmenter, &config.pattern) {
        (SegmenterKind::Regex, Some(pattern)) => format!("regex({})", pattern),
        (kind, _) => kind.name().to_string(),
    }
}

/// Monitors attached to each parallel worker
fn worker_monitors(progress: &ProgressMonitor, log_misclassified: bool) -> Vec<Box<dyn EvaluationMonitor<TokenSample>>> {
    let mut monitors: Vec<Box<dyn EvaluationMonitor<TokenSample>>> = vec![Box::new(progress.clone())];
    if log_misclassified {
        monitors.push(Box::new(MisclassificationLogger::new()));
    }
    monitors
}

fn evaluate(config: &EvalConfig, console: &CliConsole) -> Result<EvalReport> {
    let Some(corpus) = &config.corpus else {
        bail!("No corpus given; pass a path or set `corpus` in the configuration file");
    };

    let segmenter = config.segmenter.build(config.pattern.as_deref())?;

    let mut loader = CorpusLoader::new().with_split_tag(config.split_tag.clone());
    if let Some(format) = config.format {
        loader = loader.with_format(format);
    }
    let stream = loader
        .open(corpus)
        .with_context(|| format!("Failed to open corpus {}", corpus.display()))?;

    console.info(&format!(
        "Scoring {} on {} with {} worker(s)",
        segmenter_label(config),
        corpus.display(),
        config.workers
    ));

    let started = Instant::now();
    let (fmeasure, outcomes) = if config.workers > 1 {
        let progress = ProgressMonitor::new(&format!("Scoring on {} workers", config.workers));
        let result = ParallelEvaluator::new(config.workers, config.chunk_size)
            .run_with_monitors(&segmenter, stream, || {
                worker_monitors(&progress, config.log_misclassified)
            });
        match result {
            Ok(outcome) => {
                progress.finish();
                (outcome.fmeasure, outcome.outcomes)
            }
            Err(e) => {
                progress.abandon();
                return Err(anyhow::Error::new(e).context("Evaluation aborted"));
            }
        }
    } else {
        let progress = ProgressMonitor::new("Scoring");
        let mut evaluator = SegmentationEvaluator::new(&segmenter).with_monitor(progress.clone());
        if config.log_misclassified {
            evaluator.add_monitor(MisclassificationLogger::new());
        }

        if let Err(e) = evaluator.try_evaluate(stream) {
            progress.abandon();
            console.warn(&format!(
                "Evaluation aborted after {} samples; partial results:",
                evaluator.outcomes().total()
            ));
            eprintln!("{}", evaluator.fmeasure());
            return Err(anyhow::Error::new(e).context("Evaluation aborted"));
        }
        progress.finish();
        (*evaluator.fmeasure(), *evaluator.outcomes())
    };

    Ok(EvalReport::new(
        segmenter_label(config),
        corpus.display().to_string(),
        fmeasure,
        outcomes,
        started.elapsed(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Cli, Commands};
    use clap::Parser;
    use segscore_core::ReportFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn eval_args(argv: &[&str]) -> EvalArgs {
        let mut full = vec!["segscore", "eval"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Eval(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = EvalConfig::new("from_file.txt").with_workers(8).with_split_tag("|");
        let args = eval_args(&["cli.txt", "--workers", "2", "--report", "json"]);

        let config = apply_overrides(file, &args);
        assert_eq!(config.corpus, Some(PathBuf::from("cli.txt")));
        assert_eq!(config.workers, 2);
        assert_eq!(config.split_tag, "|");
        assert_eq!(config.report_format, ReportFormat::Json);
    }

    #[test]
    fn test_segmenter_label() {
        let config = EvalConfig::default()
            .with_segmenter(SegmenterKind::Regex)
            .with_pattern("[a-z]+");
        assert_eq!(segmenter_label(&config), "regex([a-z]+)");
        assert_eq!(segmenter_label(&EvalConfig::default()), "simple");
    }

    #[test]
    fn test_sequential_and_parallel_runs_agree() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("gold.txt");
        fs::write(&corpus, "Hello<SPLIT>, world<SPLIT>!\nplain words\nrock'n'roll\n").unwrap();
        let console = CliConsole::new(false);

        let sequential = evaluate(&EvalConfig::new(&corpus), &console).unwrap();
        let parallel = evaluate(&EvalConfig::new(&corpus).with_workers(3).with_chunk_size(1), &console).unwrap();

        assert_eq!(sequential.counts, parallel.counts);
        assert_eq!(sequential.outcomes.total(), 3);
    }

    #[test]
    fn test_parallel_run_honors_misclassified_logging() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("gold.txt");
        fs::write(&corpus, "Hello<SPLIT>, world<SPLIT>!\nrock'n'roll\nplain words\n").unwrap();
        let console = CliConsole::new(false);

        let sequential = evaluate(&EvalConfig::new(&corpus).log_misclassified(), &console).unwrap();
        let parallel = evaluate(
            &EvalConfig::new(&corpus)
                .with_workers(2)
                .with_chunk_size(1)
                .log_misclassified(),
            &console,
        )
        .unwrap();

        assert_eq!(parallel.counts, sequential.counts);
        assert_eq!(parallel.outcomes, sequential.outcomes);
    }

    #[test]
    fn test_worker_monitors() {
        let progress = ProgressMonitor::new("Scoring");
        assert_eq!(worker_monitors(&progress, false).len(), 1);
        assert_eq!(worker_monitors(&progress, true).len(), 2);

        let sample = TokenSample::parse("a b", segscore_core::DEFAULT_SPLIT_TAG).unwrap();
        for mut monitor in worker_monitors(&progress, true) {
            monitor.misclassified(&sample, &sample).unwrap();
        }
        progress.finish();
    }

    #[test]
    fn test_run_saves_report() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("gold.txt");
        fs::write(&corpus, "a b c\n").unwrap();
        let output = temp_dir.path().join("reports");

        let args = eval_args(&[
            corpus.to_str().unwrap(),
            "--config",
            temp_dir.path().join("absent.toml").to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        run(&args, EvalConfig::default(), &CliConsole::new(false)).unwrap();

        let saved: Vec<_> = fs::read_dir(&output).unwrap().collect();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_missing_corpus_is_an_error() {
        let console = CliConsole::new(false);
        assert!(evaluate(&EvalConfig::default(), &console).is_err());
    }

    #[test]
    fn test_parse_failure_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("gold.txt");
        fs::write(&corpus, "fine\n<SPLIT>bad\n").unwrap();

        let err = evaluate(&EvalConfig::new(&corpus), &CliConsole::new(false)).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
