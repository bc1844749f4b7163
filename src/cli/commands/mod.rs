use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{CommandFactory, Parser, Subcommand};

use super::{Output, setup_logging};

pub mod clean;
pub mod config;
pub mod count;
pub mod generate;
pub mod version;

#[derive(Parser)]
#[command(
    name = "wordfreq",
    version = env!("CARGO_PKG_VERSION"),
    about = "Count word frequencies across text files, sequentially or in parallel",
    long_about = "wordfreq counts how often each word occurs across a set of text files, \
                  compares sequential and parallel runs, and keeps a history of executions \
                  with their most and least used words.",
    styles = help_styles()
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count words in files or in the generated working set
    Count(count::CountArgs),
    /// Generate a working set from the base corpus
    Generate(generate::GenerateArgs),
    /// Delete generated working files
    Clean(clean::CleanArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {dir}"))?;
        }

        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::Count(args)) => count::execute(args, config_path, &output),
            Some(Commands::Generate(args)) => generate::execute(args, config_path, &output),
            Some(Commands::Clean(args)) => clean::execute(args, config_path, &output),
            Some(Commands::Config(args)) => config::execute(args, config_path),
            Some(Commands::Version(args)) => version::execute(args),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

fn help_styles() -> Styles {
    Styles::default()
        .header(Style::new().bold())
        .usage(Style::new().bold())
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}
