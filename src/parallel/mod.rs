//! Generic parallel execution framework
//!
//! This module provides the execution strategies the counter dispatches work
//! through. It knows nothing about words or files.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies thread percentage and max threads to the detected cores
//! - **Execution Strategy**: Sequential vs Parallel execution behind one `execute` call
//! - **Pool Lifetime**: Workers are scoped threads, joined before `execute` returns on every path
//! - **Failure Policy**: The first failing item stops the producer and fails the whole batch
//!
//! ## What This Module Does NOT Do:
//! - **Domain Logic**: Does not understand tokens, frequency tables or rankings
//! - **Cancellation**: A stalled work item blocks the batch until it finishes
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Client        │    │   Parallel       │    │   System        │
//! │   (Counter)     │───▶│   Module         │───▶│   Resources     │
//! │                 │    │                  │    │                 │
//! │ • Source texts  │    │ • CPU cores      │    │ • Hardware      │
//! │ • Shared table  │    │ • Thread mgmt    │    │ • OS limits     │
//! │ • Rankings      │    │ • Join/failure   │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use wordfreq::parallel::ExecutionStrategy;
//!
//! let workers = ExecutionStrategy::calculate_optimal_workers(0, 100);
//! let strategy = ExecutionStrategy::Parallel { workers };
//!
//! let doubled = strategy
//!     .execute(&[1, 2, 3], |x, _worker_id| Ok(x * 2), None::<fn(usize, usize, usize)>)
//!     .unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

pub mod core;
pub mod progress;

// Re-export main types for easier access
pub use core::{ExecutionStrategy, ParallelExecutor, SequentialExecutor};
pub use progress::RunProgress;
