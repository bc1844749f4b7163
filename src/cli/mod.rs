//! Command-line interface for wordfreq
//!
//! Argument parsing lives in [`commands`], one module per subcommand.
//! [`Output`] renders everything meant for the user; diagnostics go through
//! `tracing`, set up by [`setup_logging`].

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;

/// Install the tracing subscriber for the given verbosity.
///
/// `RUST_LOG` wins when set. Quiet mode installs nothing.
pub fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"), // -vvv shows the walker too
        }
    });

    // try_init: a second CLI run in the same process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
