use clap::Parser;

use wordfreq::{Cli, Output};

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if let Err(e) = cli.run() {
        // Errors are shown even in quiet mode
        Output::new(false, quiet).error(&format!("Error: {e:#}"));
        std::process::exit(1);
    }
}
