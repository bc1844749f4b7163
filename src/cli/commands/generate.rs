use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::cli::Output;
use crate::config::WordfreqConfig;
use crate::corpus::{self, WorkingSetSpec};

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Directory holding the base corpus
    #[arg(long, value_name = "DIR")]
    pub base: Option<String>,

    /// Directory to write working files to
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,

    /// Number of working files (0 uses the default of 100)
    #[arg(long)]
    pub files: Option<usize>,

    /// Size of each working file in kb (0 uses the default of 256)
    #[arg(long, value_name = "KB")]
    pub size: Option<u64>,

    /// Seed for reproducible file contents
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: GenerateArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = WordfreqConfig::load(config_path)?;
    let corpus_settings = &config.corpus;

    let base_dir = args.base.as_deref().unwrap_or(&corpus_settings.base_dir);
    let out_dir = args.out.as_deref().unwrap_or(&corpus_settings.working_dir);

    let mut spec = WorkingSetSpec::new(
        args.files.unwrap_or(corpus_settings.files),
        args.size.unwrap_or(corpus_settings.size_kb),
        corpus_settings.base_file_kb,
    );
    if let Some(seed) = args.seed {
        spec = spec.with_seed(seed);
    }

    output.step(&format!(
        "Generating {} working files of {}kb from {}",
        spec.files, spec.size_kb, base_dir
    ));
    let generated = corpus::generate(Path::new(base_dir), Path::new(out_dir), &spec)?;

    output.success(&format!(
        "Created {} working files in {} (seed {})",
        generated.paths.len(),
        out_dir,
        generated.seed
    ));
    Ok(())
}
