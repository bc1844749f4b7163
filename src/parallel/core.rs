use anyhow::{Result, anyhow};
use crossbeam::channel::{Receiver, Sender, bounded};
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Worker pool that lives for exactly one `execute` call.
///
/// Threads are spawned inside a `crossbeam::thread::scope`, so every worker is
/// joined before `execute` returns, whether the work succeeded, a processor
/// returned an error, or a worker panicked.
pub struct ParallelExecutor {
    max_workers: usize,
    buffer_size: usize,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<'env, T, F, P, R> {
    worker_id: usize,
    work_rx: Receiver<(usize, &'env T)>,
    result_tx: Sender<(usize, Result<R>)>,
    progress_counter: &'env AtomicUsize,
    failed: &'env AtomicBool,
    total_items: usize,
    processor: &'env F,
    progress_reporter: Option<&'env P>,
}

impl ParallelExecutor {
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            max_workers,
            buffer_size: max_workers * 2,
        }
    }

    /// Run `processor` over every item using a producer-consumer pattern.
    ///
    /// Results come back in input order. The first error stops the producer,
    /// remaining queued items are skipped, and that error is returned once
    /// all workers have exited.
    pub fn execute<T, R, F, P>(
        &self,
        work_items: &[T],
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T, usize) -> Result<R> + Sync,
        P: Fn(usize, usize, usize) + Sync,
    {
        if work_items.is_empty() {
            return Ok(Vec::new());
        }

        let actual_workers = std::cmp::min(self.max_workers, work_items.len());
        let total_items = work_items.len();
        tracing::debug!(
            "Starting {} workers for {} work items",
            actual_workers,
            total_items
        );

        let (work_tx, work_rx): (Sender<(usize, &T)>, Receiver<(usize, &T)>) =
            bounded(self.buffer_size);
        let (result_tx, result_rx): (Sender<(usize, Result<R>)>, Receiver<(usize, Result<R>)>) =
            bounded(self.buffer_size);

        let progress_counter = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);

        let collected = crossbeam::thread::scope(|s| -> Result<Vec<(usize, Result<R>)>> {
            for worker_id in 0..actual_workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    progress_counter: &progress_counter,
                    failed: &failed,
                    total_items,
                    processor: &processor,
                    progress_reporter: progress_reporter.as_ref(),
                };

                s.builder()
                    .name(format!("count-worker-{worker_id}"))
                    .spawn(move |_| Self::worker_thread(ctx))
                    .map(|_| ())
                    .map_err(|e| anyhow!("Failed to spawn worker {}: {}", worker_id, e))?;
            }

            // Producer thread: send work to workers until done or a worker fails
            let failed = &failed;
            s.spawn(move |_| {
                for item in work_items.iter().enumerate() {
                    if failed.load(Ordering::Acquire) || work_tx.send(item).is_err() {
                        break;
                    }
                }
            });

            // Drop our copies so the collector sees the channel close
            drop(work_rx);
            drop(result_tx);

            Ok(Self::collect_results(result_rx, total_items))
        })
        .map_err(|payload| {
            anyhow!(
                "Worker thread panicked during parallel execution: {}",
                panic_message(payload.as_ref())
            )
        })??;

        let mut ordered = Vec::with_capacity(collected.len());
        let mut first_error = None;
        for (index, result) in collected {
            match result {
                Ok(value) => ordered.push((index, value)),
                Err(e) => {
                    // Keep the error from the earliest work item for a stable report
                    if first_error.as_ref().is_none_or(|(i, _)| index < *i) {
                        first_error = Some((index, e));
                    }
                }
            }
        }

        if let Some((index, error)) = first_error {
            return Err(error.context(format!("Work item {} failed", index + 1)));
        }

        ordered.sort_by_key(|(index, _)| *index);
        Ok(ordered.into_iter().map(|(_, value)| value).collect())
    }

    fn worker_thread<T, F, P, R>(ctx: WorkerContext<'_, T, F, P, R>)
    where
        F: Fn(&T, usize) -> Result<R>,
        P: Fn(usize, usize, usize),
    {
        while let Ok((index, work_item)) = ctx.work_rx.recv() {
            // Drain without processing once the run is known to have failed
            if ctx.failed.load(Ordering::Acquire) {
                continue;
            }

            let result = (ctx.processor)(work_item, ctx.worker_id);
            if result.is_err() {
                ctx.failed.store(true, Ordering::Release);
            }

            if ctx.result_tx.send((index, result)).is_err() {
                break; // Receiver dropped
            }

            let current = ctx.progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(reporter) = ctx.progress_reporter {
                reporter(current, ctx.total_items, ctx.worker_id);
            }
        }
    }

    fn collect_results<R>(
        result_rx: Receiver<(usize, Result<R>)>,
        total_items: usize,
    ) -> Vec<(usize, Result<R>)> {
        let mut results = Vec::with_capacity(total_items);

        // Ends when every worker has dropped its sender
        while let Ok(result) = result_rx.recv() {
            results.push(result);
        }

        results
    }
}

/// Runs every item on the calling thread, in order
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn execute<T, R, F, P>(
        work_items: &[T],
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        F: Fn(&T, usize) -> Result<R>,
        P: Fn(usize, usize, usize), // (current, total, worker_id)
    {
        let total_items = work_items.len();
        let mut results = Vec::with_capacity(total_items);

        for (index, work_item) in work_items.iter().enumerate() {
            // Sequential uses worker_id 0
            let result = processor(work_item, 0)
                .map_err(|e| e.context(format!("Work item {} failed", index + 1)))?;
            results.push(result);

            if let Some(reporter) = &progress_reporter {
                reporter(index + 1, total_items, 0);
            }
        }

        Ok(results)
    }
}

/// Execution strategy enum for choosing between parallel and sequential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    pub fn execute<T, R, F, P>(
        &self,
        work_items: &[T],
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T, usize) -> Result<R> + Sync,
        P: Fn(usize, usize, usize) + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => {
                SequentialExecutor::execute(work_items, processor, progress_reporter)
            }
            ExecutionStrategy::Parallel { workers } => {
                ParallelExecutor::new(*workers).execute(work_items, processor, progress_reporter)
            }
        }
    }

    /// Number of threads this strategy will run work on
    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel { workers } => (*workers).max(1),
        }
    }

    /// Calculate optimal workers based on available system resources and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// # Examples
    /// ```rust
    /// use wordfreq::parallel::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 100);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(2, 100);
    /// assert!(workers <= 2);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means use percentage calculation only
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    // crossbeam bundles the payloads of every panicked thread in the scope
    if let Some(payloads) = payload.downcast_ref::<Vec<Box<dyn Any + Send + 'static>>>() {
        return payloads
            .iter()
            .map(|p| panic_message(p.as_ref()))
            .collect::<Vec<_>>()
            .join("; ");
    }

    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
