use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::cli::Output;
use crate::config::WordfreqConfig;
use crate::corpus;

#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    /// Directory to remove working files from (default: configured working directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,
}

pub fn execute(args: CleanArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = WordfreqConfig::load(config_path)?;
    let dir = args.dir.as_deref().unwrap_or(&config.corpus.working_dir);

    let removed = corpus::clean(Path::new(dir))?;
    if removed == 0 {
        output.info(&format!("No working files found in {dir}"));
    } else {
        output.success(&format!("Deleted {removed} working files from {dir}"));
    }
    Ok(())
}
