use anyhow::Result;
use std::time::Instant;

use crate::config::{CounterSettings, MAX_TOP_WORDS};
use crate::parallel::{ExecutionStrategy, RunProgress};

use super::history::{ExecutionHistory, ExecutionMode, ExecutionRecord, NewExecution};
use super::ranking::RankedView;
use super::table::FrequencyTable;
use super::task::{FileCountingTask, SourceText};

/// The loaded input of a run: source texts plus the size setting they were
/// generated with (reported only, never used for counting)
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub sources: Vec<SourceText>,
    pub file_size_kb: u64,
}

impl SourceBatch {
    pub fn new(sources: Vec<SourceText>, file_size_kb: u64) -> Self {
        Self {
            sources,
            file_size_kb,
        }
    }

    /// Batch whose size setting is the mean source size, rounded up to whole kb
    pub fn with_measured_size(sources: Vec<SourceText>) -> Self {
        let file_size_kb = if sources.is_empty() {
            0
        } else {
            let total: usize = sources.iter().map(SourceText::size).sum();
            (total as u64).div_ceil(1024 * sources.len() as u64)
        };
        Self::new(sources, file_size_kb)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Everything a caller gets back from one completed run
#[derive(Debug)]
pub struct RunReport {
    /// Copy of the record appended to the session history
    pub record: ExecutionRecord,
    /// Final counts of the run, frozen for ranking
    pub ranking: RankedView,
    /// Tokens counted across all sources
    pub tokens: u64,
    /// Threads the run was dispatched on
    pub workers: usize,
}

/// Caller-held counting context.
///
/// Owns the execution history and the counter settings. Each call to
/// [`CountSession::run`] builds a fresh frequency table, dispatches one
/// counting task per source, ranks the result, and appends exactly one
/// record. A failed run appends nothing.
#[derive(Debug, Clone)]
pub struct CountSession {
    settings: CounterSettings,
    history: ExecutionHistory,
    show_progress: bool,
}

impl CountSession {
    pub fn new(settings: CounterSettings) -> Self {
        let show_progress = settings.progress;
        Self {
            settings,
            history: ExecutionHistory::new(),
            show_progress,
        }
    }

    /// Disable progress bars regardless of settings (quiet output, tests)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Strategy a run in `mode` over `file_count` files would use
    pub fn strategy_for(&self, mode: ExecutionMode, file_count: usize) -> ExecutionStrategy {
        match mode {
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Parallel => {
                let max_workers = ExecutionStrategy::calculate_optimal_workers(
                    self.settings.max_threads,
                    self.settings.thread_percentage,
                );
                // Don't create more workers than files
                ExecutionStrategy::Parallel {
                    workers: max_workers.min(file_count.max(1)),
                }
            }
        }
    }

    /// Count every source in `batch` and record the run
    pub fn run(&mut self, mode: ExecutionMode, batch: &SourceBatch) -> Result<RunReport> {
        self.run_with(mode, batch, count_sources)
    }

    /// `run` with the dispatch step supplied by the caller
    pub(crate) fn run_with<C>(
        &mut self,
        mode: ExecutionMode,
        batch: &SourceBatch,
        count: C,
    ) -> Result<RunReport>
    where
        C: FnOnce(
            &ExecutionStrategy,
            &[SourceText],
            Option<&RunProgress>,
        ) -> Result<(FrequencyTable, u64)>,
    {
        let strategy = self.strategy_for(mode, batch.len());
        let workers = strategy.workers();
        tracing::info!(
            "Counting words in {} files ({}, {} worker{})",
            batch.len(),
            mode,
            workers,
            if workers == 1 { "" } else { "s" }
        );

        let progress = self.progress_for(mode, batch.len(), workers);
        let start_time = Instant::now();

        let (table, tokens) = match count(&strategy, &batch.sources, progress.as_ref()) {
            Ok(counted) => counted,
            Err(e) => {
                if let Some(progress) = &progress {
                    progress.finish();
                }
                tracing::warn!("{} run failed, no record kept: {:#}", mode, e);
                return Err(e);
            }
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;
        if let Some(progress) = &progress {
            progress.finish();
        }
        tracing::info!(
            "{} run counted {} tokens ({} distinct) in {} ms",
            mode,
            tokens,
            table.len(),
            duration_ms
        );

        let mut ranking = table.into_ranked();
        let kept = self.settings.top_words.min(MAX_TOP_WORDS);
        let top_words = ranking.top(kept);
        let bottom_words = ranking.bottom(kept);

        let record = self
            .history
            .append(NewExecution {
                mode,
                file_count: batch.len(),
                file_size_kb: batch.file_size_kb,
                duration_ms,
                top_words,
                bottom_words,
            })
            .clone();

        Ok(RunReport {
            record,
            ranking,
            tokens,
            workers,
        })
    }

    fn progress_for(
        &self,
        mode: ExecutionMode,
        total: usize,
        workers: usize,
    ) -> Option<RunProgress> {
        if !self.show_progress || total == 0 {
            return None;
        }
        Some(match mode {
            ExecutionMode::Sequential => RunProgress::sequential(total),
            ExecutionMode::Parallel => RunProgress::parallel(total, workers),
        })
    }
}

/// Dispatch one counting task per source into a fresh table.
///
/// Returns the filled table and the number of tokens counted. On failure the
/// partially filled table is dropped with the error.
pub fn count_sources(
    strategy: &ExecutionStrategy,
    sources: &[SourceText],
    progress: Option<&RunProgress>,
) -> Result<(FrequencyTable, u64)> {
    let table = FrequencyTable::new();

    let token_counts = strategy.execute(
        sources,
        |source: &SourceText, _worker_id: usize| Ok(FileCountingTask::new(source, &table).run()),
        progress.map(|progress| {
            move |current: usize, total: usize, worker_id: usize| {
                progress.update(current, total, worker_id)
            }
        }),
    )?;

    let tokens = token_counts.iter().map(|&n| n as u64).sum();
    Ok((table, tokens))
}
