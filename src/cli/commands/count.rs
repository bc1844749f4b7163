//! `wordfreq count`: run the counter over files and report the history

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::{ConfigFormat, WordfreqConfig};
use crate::corpus;
use crate::counter::{
    CountSession, ExecutionMode, ExecutionRecord, HistorySummary, SourceBatch,
};

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Files or directories to count (default: the configured working directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Counting strategy
    #[arg(long, value_enum, default_value = "both")]
    pub mode: ModeSelection,

    /// Runs per selected mode
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Most/least used words kept per execution (1-5)
    #[arg(long)]
    pub top: Option<usize>,

    /// Maximum worker threads for parallel runs
    #[arg(long)]
    pub workers: Option<usize>,

    /// File size in kb to report (default: configured size, or measured for explicit paths)
    #[arg(long, value_name = "KB")]
    pub file_size: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeSelection {
    Sequential,
    Parallel,
    /// Sequential then parallel each round, checking both agree
    Both,
}

impl ModeSelection {
    fn modes(self) -> &'static [ExecutionMode] {
        match self {
            ModeSelection::Sequential => &[ExecutionMode::Sequential],
            ModeSelection::Parallel => &[ExecutionMode::Parallel],
            ModeSelection::Both => &ExecutionMode::ALL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

/// Machine-readable report for `--format json|yaml`
#[derive(Serialize)]
struct CountReport<'a> {
    records: &'a [ExecutionRecord],
    summary: HistorySummary,
}

pub fn execute(args: CountArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let mut config = WordfreqConfig::load(config_path)?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    // Structured reports own stdout
    let silent;
    let output = if args.format == ReportFormat::Text {
        output
    } else {
        silent = Output::new(false, true);
        &silent
    };

    let batch = load_batch(&args, &config)?;
    if batch.is_empty() {
        output.warning("No files to count, runs will record empty rankings");
    } else {
        output.verbose(&format!(
            "Loaded {} files ({}kb each)",
            batch.len(),
            batch.file_size_kb
        ));
    }

    let mut session = CountSession::new(config.counter.clone());
    if args.no_progress || output.is_quiet() || args.format != ReportFormat::Text {
        session = session.without_progress();
    }

    for round in 1..=args.runs {
        let mut round_counts: Option<(ExecutionMode, HashMap<String, u64>)> = None;

        for &mode in args.mode.modes() {
            let report = session.run(mode, &batch)?;
            tracing::debug!(
                "Round {} {} run: {} tokens on {} workers",
                round,
                mode,
                report.tokens,
                report.workers
            );
            if args.format == ReportFormat::Text {
                output.execution(&report.record);
            }

            if args.mode == ModeSelection::Both {
                let counts = report.ranking.to_counts();
                if let Some((first_mode, first_counts)) = &round_counts {
                    if *first_counts != counts {
                        bail!(
                            "{} and {} runs produced different counts in round {}",
                            first_mode,
                            mode,
                            round
                        );
                    }
                } else {
                    round_counts = Some((mode, counts));
                }
            }
        }
    }

    match args.format {
        ReportFormat::Text => {
            output.history(session.history());
            if args.mode == ModeSelection::Both {
                output.success("Sequential and parallel runs produced identical counts");
            }
        }
        ReportFormat::Json | ReportFormat::Yaml => {
            let format = if args.format == ReportFormat::Json {
                ConfigFormat::Json
            } else {
                ConfigFormat::Yaml
            };
            let report = CountReport {
                records: session.history().records(),
                summary: session.history().summary(),
            };
            println!("{}", format.serialize(&report)?);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut WordfreqConfig, args: &CountArgs) {
    if let Some(top) = args.top {
        config.counter.top_words = top;
    }
    if let Some(workers) = args.workers {
        config.counter.max_threads = workers;
    }
    if args.no_progress {
        config.counter.progress = false;
    }
}

fn load_batch(args: &CountArgs, config: &WordfreqConfig) -> Result<SourceBatch> {
    if args.paths.is_empty() {
        let dir = Path::new(&config.corpus.working_dir);
        let sources = corpus::load_working_set(dir)?;
        let size_kb = args.file_size.unwrap_or(config.corpus.size_kb);
        return Ok(SourceBatch::new(sources, size_kb));
    }

    let sources = corpus::load_sources(&args.paths)?;
    Ok(match args.file_size {
        Some(size_kb) => SourceBatch::new(sources, size_kb),
        None => SourceBatch::with_measured_size(sources),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::commands::Commands;
    use clap::Parser;

    fn parse(args: &[&str]) -> CountArgs {
        let mut argv = vec!["wordfreq", "count"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Some(Commands::Count(args)) => args,
            _ => panic!("expected count command"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.mode, ModeSelection::Both);
        assert_eq!(args.runs, 1);
        assert_eq!(args.format, ReportFormat::Text);
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_zero_runs_rejected() {
        let result = Cli::try_parse_from(["wordfreq", "count", "--runs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let args = parse(&["--top", "3", "--workers", "2", "--no-progress"]);
        let mut config = WordfreqConfig::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.counter.top_words, 3);
        assert_eq!(config.counter.max_threads, 2);
        assert!(!config.counter.progress);
        assert_eq!(config.counter.thread_percentage, 100);
    }

    #[test]
    fn test_top_override_is_validated() {
        let args = parse(&["--top", "8"]);
        let mut config = WordfreqConfig::default();
        apply_overrides(&mut config, &args);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("counter.top_words"));
    }

    #[test]
    fn test_mode_selection_order() {
        assert_eq!(
            ModeSelection::Both.modes(),
            &[ExecutionMode::Sequential, ExecutionMode::Parallel]
        );
        assert_eq!(ModeSelection::Parallel.modes(), &[ExecutionMode::Parallel]);
    }

    #[test]
    fn test_load_batch_measures_explicit_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "x".repeat(3000)).unwrap();

        let args = parse(&[file.to_str().unwrap()]);
        let batch = load_batch(&args, &WordfreqConfig::default()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.file_size_kb, 3);
    }
}
