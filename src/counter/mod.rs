//! Word frequency counting engine
//!
//! A run takes already-loaded source texts, dispatches one
//! [`FileCountingTask`] per source through an
//! [`ExecutionStrategy`](crate::parallel::ExecutionStrategy) into a shared
//! [`FrequencyTable`], then freezes the table into a [`RankedView`] and
//! appends an [`ExecutionRecord`] to the caller's [`ExecutionHistory`].
//!
//! ```rust
//! use wordfreq::config::CounterSettings;
//! use wordfreq::counter::{CountSession, ExecutionMode, RankedEntry, SourceBatch, SourceText};
//!
//! let mut session = CountSession::new(CounterSettings::default()).without_progress();
//! let batch = SourceBatch::new(
//!     vec![
//!         SourceText::new("one", "a b a"),
//!         SourceText::new("two", "b c"),
//!         SourceText::new("three", "a"),
//!     ],
//!     4,
//! );
//!
//! let mut report = session.run(ExecutionMode::Parallel, &batch).unwrap();
//! assert_eq!(report.ranking.top(2), vec![RankedEntry::new("a", 3), RankedEntry::new("b", 2)]);
//! assert_eq!(report.ranking.bottom(1), vec![RankedEntry::new("c", 1)]);
//! assert_eq!(session.history().len(), 1);
//! ```

pub mod history;
pub mod ranking;
pub mod session;
pub mod table;
pub mod task;
pub mod tokenizer;

// Re-export main types for easier access
pub use history::{
    ExecutionHistory, ExecutionMode, ExecutionRecord, HistorySummary, ModeSummary, NewExecution,
};
pub use ranking::{RankedEntry, RankedView, SortOrder};
pub use session::{CountSession, RunReport, SourceBatch, count_sources};
pub use table::FrequencyTable;
pub use task::{FileCountingTask, SourceText};
