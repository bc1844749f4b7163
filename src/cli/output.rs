//! Console output for wordfreq
//!
//! Styled status messages plus the execution record and history blocks
//! printed by `wordfreq count`.

use console::style;

use crate::counter::{ExecutionHistory, ExecutionRecord, RankedEntry};

const RULE_WIDTH: usize = 79;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    pub fn step(&self, step: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), step);
        }
    }

    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<18}{}", style(key).dim(), styled_value);
        }
    }

    /// Print a `### TITLE ####...` banner
    pub fn banner(&self, title: &str) {
        if !self.quiet {
            println!("{}", style(banner_line(title)).bold().cyan());
        }
    }

    fn rule(&self) {
        if !self.quiet {
            println!("{}", style("#".repeat(RULE_WIDTH)).cyan());
        }
    }

    /// Print one execution record inside its own banner
    pub fn execution(&self, record: &ExecutionRecord) {
        self.banner("EXECUTION INFO");
        self.record_fields(record);
        self.rule();
        self.blank_line();
    }

    /// Print every record of the history followed by per-mode averages
    pub fn history(&self, history: &ExecutionHistory) {
        self.banner("HISTORIC OF EXECUTIONS");
        for record in history.records() {
            self.record_fields(record);
            self.rule();
        }
        self.blank_line();

        self.banner("AVERAGE EXECUTION TIME");
        for summary in history.summary().modes {
            self.key_value(
                &format!("{} average:", summary.mode),
                &format!(
                    "{} seconds ({} run{})",
                    format_seconds(summary.average_ms),
                    summary.runs,
                    if summary.runs == 1 { "" } else { "s" }
                ),
                false,
            );
        }
        self.rule();
    }

    fn record_fields(&self, record: &ExecutionRecord) {
        self.key_value("Execution ID:", &record.id().to_string(), false);
        self.key_value("Execution type:", record.mode().as_str(), false);
        self.key_value("Number of files:", &record.file_count().to_string(), false);
        self.key_value("Size of files:", &format!("{}kb", record.file_size_kb()), false);
        self.key_value(
            "Execution time:",
            &format!("{} seconds", format_seconds(record.duration_ms())),
            true,
        );
        self.key_value("Most used words:", &format_entries(record.top_words()), false);
        self.key_value("Less used words:", &format_entries(record.bottom_words()), false);
    }
}

/// Milliseconds as seconds with three decimals
pub fn format_seconds(duration_ms: u64) -> String {
    format!("{:.3}", duration_ms as f64 / 1000.0)
}

/// `[a=3, b=2]`
pub fn format_entries(entries: &[RankedEntry]) -> String {
    let joined = entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

fn banner_line(title: &str) -> String {
    let head = format!("### {title} ");
    let fill = RULE_WIDTH.saturating_sub(head.chars().count());
    format!("{head}{}", "#".repeat(fill))
}
