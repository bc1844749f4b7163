//! # wordfreq - word frequency counting with sequential and parallel strategies
//!
//! Counts how often each whitespace-separated word occurs across a set of
//! text files. The same batch can be counted on the calling thread or on a
//! pool of worker threads sharing one concurrent table, and every run is kept
//! in an execution history with its duration and its most and least frequent
//! words.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build a working set of 100 files of 256kb from ./text
//! wordfreq generate
//!
//! # Count it sequentially and in parallel, three rounds each
//! wordfreq count --runs 3
//!
//! # Remove the working files again
//! wordfreq clean
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod counter;
pub mod parallel;

pub use cli::{Cli, Output};
pub use config::WordfreqConfig;
pub use counter::{CountSession, ExecutionHistory, ExecutionMode, FrequencyTable, RankedView};

/// Result type alias for wordfreq operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
