use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const BAR_TEMPLATE: &str =
    "{spinner:.green} {prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} files {msg}";
const WORKER_TEMPLATE: &str = "  worker {prefix:>2} {bar:30.green/yellow} {pos:>5} files";

/// Progress display for one counting run.
///
/// Sequential runs get a single bar; parallel runs additionally get one bar per
/// worker showing how many files that worker has handled.
#[derive(Clone)]
pub struct RunProgress {
    multi_progress: MultiProgress,
    overall_bar: ProgressBar,
    worker_bars: Vec<ProgressBar>,
    worker_counts: Arc<Vec<AtomicUsize>>,
}

impl RunProgress {
    /// Create a sequential progress reporter
    pub fn sequential(total_files: usize) -> Self {
        Self::build(total_files, 0, "sequential", ProgressDrawTarget::stderr())
    }

    /// Create a parallel progress reporter with per-worker bars
    pub fn parallel(total_files: usize, worker_count: usize) -> Self {
        Self::build(total_files, worker_count, "parallel", ProgressDrawTarget::stderr())
    }

    fn build(
        total_files: usize,
        worker_count: usize,
        label: &str,
        target: ProgressDrawTarget,
    ) -> Self {
        let multi_progress = MultiProgress::with_draw_target(target);

        let overall_bar = multi_progress.add(ProgressBar::new(total_files as u64));
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            overall_bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        overall_bar.set_prefix(label.to_string());

        let worker_style = ProgressStyle::with_template(WORKER_TEMPLATE).ok();
        let estimated_per_worker = if worker_count > 0 {
            total_files / worker_count + 1
        } else {
            0
        };
        let worker_bars: Vec<ProgressBar> = (0..worker_count)
            .map(|worker_id| {
                let bar = multi_progress.add(ProgressBar::new(estimated_per_worker as u64));
                if let Some(style) = &worker_style {
                    bar.set_style(style.clone());
                }
                bar.set_prefix((worker_id + 1).to_string());
                bar
            })
            .collect();

        let worker_counts = (0..worker_count).map(|_| AtomicUsize::new(0)).collect();

        Self {
            multi_progress,
            overall_bar,
            worker_bars,
            worker_counts: Arc::new(worker_counts),
        }
    }

    /// Record one finished file; matches the executor's progress callback shape
    pub fn update(&self, completed: usize, total: usize, worker_id: usize) {
        self.overall_bar.set_position(completed as u64);
        if completed == total {
            self.overall_bar.set_message("done");
        }

        if let (Some(bar), Some(count)) = (
            self.worker_bars.get(worker_id),
            self.worker_counts.get(worker_id),
        ) {
            let handled = count.fetch_add(1, Ordering::Relaxed) + 1;
            bar.set_position(handled as u64);
        }
    }

    /// Finish all progress bars and clear them from the terminal
    pub fn finish(&self) {
        for bar in &self.worker_bars {
            bar.finish();
        }
        self.overall_bar.finish();
        let _ = self.multi_progress.clear();
    }
}
