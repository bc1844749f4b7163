use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use super::loader::walk_files;

/// Working files generated when zero is requested
pub const DEFAULT_FILES: usize = 100;

/// Working file size in kb used when zero is requested
pub const DEFAULT_SIZE_KB: u64 = 256;

const WORKING_PREFIX: &str = "TextFile_";
const WORKING_SUFFIX: &str = "_tmp.txt";

/// File name of the `number`th working file (1-based)
pub fn working_file_name(number: usize) -> String {
    format!("{WORKING_PREFIX}{number}{WORKING_SUFFIX}")
}

/// Number of a generated working file, `None` for any other name
pub fn working_file_number(name: &str) -> Option<usize> {
    name.strip_prefix(WORKING_PREFIX)?
        .strip_suffix(WORKING_SUFFIX)?
        .parse()
        .ok()
}

/// Shape of a working set to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSetSpec {
    pub files: usize,
    pub size_kb: u64,
    pub base_file_kb: u64,
    pub seed: Option<u64>,
}

impl WorkingSetSpec {
    /// Zero `files` or `size_kb` fall back to the defaults
    pub fn new(files: usize, size_kb: u64, base_file_kb: u64) -> Self {
        Self {
            files: if files == 0 { DEFAULT_FILES } else { files },
            size_kb: if size_kb == 0 { DEFAULT_SIZE_KB } else { size_kb },
            base_file_kb: base_file_kb.max(1),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Base files concatenated into each working file
    pub fn pieces_per_file(&self) -> u64 {
        (self.size_kb / self.base_file_kb).max(1)
    }
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GeneratedSet {
    pub paths: Vec<PathBuf>,
    /// Seed actually used, so a run can be reproduced
    pub seed: u64,
}

/// Base corpus files of `base_dir`: `.txt` files that are not working files
pub fn base_files(base_dir: &Path) -> Result<Vec<PathBuf>> {
    if !base_dir.is_dir() {
        bail!("Base corpus directory not found: {}", base_dir.display());
    }

    let files = walk_files(base_dir, Some(1))?
        .into_iter()
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            path.extension().is_some_and(|ext| ext == "txt") && !name.ends_with(WORKING_SUFFIX)
        })
        .collect();
    Ok(files)
}

/// Assemble `spec.files` working files in `out_dir` from random base files
pub fn generate(base_dir: &Path, out_dir: &Path, spec: &WorkingSetSpec) -> Result<GeneratedSet> {
    let bases = base_files(base_dir)?;
    if bases.is_empty() {
        bail!("No base text files found in {}", base_dir.display());
    }

    let base_texts = bases
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read base file {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let seed = spec.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let pieces = spec.pieces_per_file();

    tracing::info!(
        "Generating {} working files of {} base files each from {} ({} base files, seed {})",
        spec.files,
        pieces,
        base_dir.display(),
        base_texts.len(),
        seed
    );

    let mut paths = Vec::with_capacity(spec.files);
    for number in 1..=spec.files {
        let mut content = String::new();
        for _ in 0..pieces {
            let pick = rng.random_range(0..base_texts.len());
            content.push_str(&base_texts[pick]);
            content.push('\n');
        }

        let path = out_dir.join(working_file_name(number));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::trace!("Wrote {}", path.display());
        paths.push(path);
    }

    Ok(GeneratedSet { paths, seed })
}

/// Delete the working files of `dir`, returning how many were removed
pub fn clean(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        tracing::debug!("Nothing to clean, {} does not exist", dir.display());
        return Ok(0);
    }

    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut removed = 0;
    for entry in entries {
        let path = entry?.path();
        let is_working = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(WORKING_SUFFIX));
        if is_working && path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }
    }

    tracing::info!("Removed {} working files from {}", removed, dir.display());
    Ok(removed)
}
