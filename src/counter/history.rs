use serde::{Deserialize, Serialize};
use std::fmt;

use super::ranking::RankedEntry;

/// How a run dispatched its files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionMode {
    /// One file after another on the calling thread
    Sequential,
    /// One task per file on a worker pool
    Parallel,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "SEQUENTIAL",
            ExecutionMode::Parallel => "PARALLEL",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics of a completed run, before the history numbers it
#[derive(Debug, Clone, PartialEq)]
pub struct NewExecution {
    pub mode: ExecutionMode,
    pub file_count: usize,
    pub file_size_kb: u64,
    /// Dispatch time only, see [`ExecutionRecord::duration_ms`]
    pub duration_ms: u64,
    pub top_words: Vec<RankedEntry>,
    pub bottom_words: Vec<RankedEntry>,
}

/// Immutable summary of one completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    id: usize,
    mode: ExecutionMode,
    file_count: usize,
    file_size_kb: u64,
    /// Wall time of the counting dispatch only; file loading happens before
    /// the clock starts and ranking after it stops
    duration_ms: u64,
    top_words: Vec<RankedEntry>,
    bottom_words: Vec<RankedEntry>,
}

impl ExecutionRecord {
    /// 1-based position in the history that created it
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn file_size_kb(&self) -> u64 {
        self.file_size_kb
    }

    /// Milliseconds spent dispatching the counting tasks, excluding file loading
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Most frequent words, most frequent first
    pub fn top_words(&self) -> &[RankedEntry] {
        &self.top_words
    }

    /// Least frequent words, least frequent first
    pub fn bottom_words(&self) -> &[RankedEntry] {
        &self.bottom_words
    }
}

/// Ordered log of completed runs.
///
/// Ids are assigned on append as `len + 1`, so clearing the history restarts
/// numbering at 1.
#[derive(Debug, Default, Clone)]
pub struct ExecutionHistory {
    records: Vec<ExecutionRecord>,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, execution: NewExecution) -> &ExecutionRecord {
        let record = ExecutionRecord {
            id: self.records.len() + 1,
            mode: execution.mode,
            file_count: execution.file_count,
            file_size_kb: execution.file_size_kb,
            duration_ms: execution.duration_ms,
            top_words: execution.top_words,
            bottom_words: execution.bottom_words,
        };
        tracing::debug!("Recorded execution {} ({})", record.id, record.mode);

        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn clear(&mut self) {
        tracing::debug!("Clearing {} execution records", self.records.len());
        self.records.clear();
    }

    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&ExecutionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run count and average duration per mode, in `ExecutionMode::ALL` order
    pub fn summary(&self) -> HistorySummary {
        let modes = ExecutionMode::ALL
            .iter()
            .map(|&mode| {
                let (runs, total_ms) = self
                    .records
                    .iter()
                    .filter(|record| record.mode == mode)
                    .fold((0usize, 0u64), |(runs, total), record| {
                        (runs + 1, total + record.duration_ms)
                    });
                ModeSummary {
                    mode,
                    runs,
                    total_ms,
                    average_ms: if runs > 0 { total_ms / runs as u64 } else { 0 },
                }
            })
            .collect();

        HistorySummary { modes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSummary {
    pub mode: ExecutionMode,
    pub runs: usize,
    pub total_ms: u64,
    /// Truncating integer average; 0 when there were no runs
    pub average_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub modes: Vec<ModeSummary>,
}

impl HistorySummary {
    pub fn for_mode(&self, mode: ExecutionMode) -> Option<&ModeSummary> {
        self.modes.iter().find(|summary| summary.mode == mode)
    }
}
