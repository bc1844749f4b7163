use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use super::working_set;
use crate::counter::SourceText;

/// Regular files under `dir`, sorted by path.
///
/// Hidden files and gitignored paths are skipped. `max_depth` of `None` walks
/// the whole tree, `Some(1)` only the directory itself.
pub fn walk_files(dir: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(dir)
        .max_depth(max_depth)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Expand files and directories into the list of files to count
pub fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let found = walk_files(path, None)?;
            tracing::debug!("Found {} files under {}", found.len(), path.display());
            files.extend(found);
        } else {
            bail!("Path not found: {}", path.display());
        }
    }

    Ok(files)
}

/// Read one file into a counting source
pub fn load_source(path: &Path) -> Result<SourceText> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(SourceText::new(path.display().to_string(), text))
}

/// Load every file reachable from `paths`, failing on the first unreadable one
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceText>> {
    let files = discover_files(paths)?;
    files.iter().map(|path| load_source(path)).collect()
}

/// Load the generated working files of `dir`, in working-file number order
pub fn load_working_set(dir: &Path) -> Result<Vec<SourceText>> {
    if !dir.is_dir() {
        bail!(
            "Working directory not found: {} (run `wordfreq generate` first)",
            dir.display()
        );
    }

    let mut numbered: Vec<(usize, PathBuf)> = walk_files(dir, Some(1))?
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            working_set::working_file_number(name).map(|n| (n, path.clone()))
        })
        .collect();
    numbered.sort_by_key(|(number, _)| *number);

    numbered.iter().map(|(_, path)| load_source(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_sources_from_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b b").unwrap();
        fs::write(nested.join("a.txt"), "a").unwrap();
        let single = temp_dir.path().join("single.txt");

        fs::write(&single, "single").unwrap();

        let sources = load_sources(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(sources.len(), 3);
        assert!(sources.iter().any(|s| &*s.text == "b b"));

        let sources = load_sources(&[single]).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(&*sources[0].text, "single");
    }

    #[test]
    fn test_hidden_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".hidden"), "secret").unwrap();
        fs::write(temp_dir.path().join("visible.txt"), "shown").unwrap();

        let files = discover_files(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.txt"));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        let err = load_sources(&[missing]).unwrap_err();
        assert!(err.to_string().contains("Path not found"));
    }

    #[test]
    fn test_unreadable_file_names_the_path() {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("binary.txt");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = load_source(&binary).unwrap_err();
        assert!(err.to_string().contains("binary.txt"));
    }

    #[test]
    fn test_load_working_set_orders_by_number_and_skips_base_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("TextFile_1.txt"), "base").unwrap();
        fs::write(dir.join("TextFile_10_tmp.txt"), "ten").unwrap();
        fs::write(dir.join("TextFile_2_tmp.txt"), "two").unwrap();
        fs::write(dir.join("TextFile_1_tmp.txt"), "one").unwrap();

        let sources = load_working_set(dir).unwrap();
        let texts: Vec<&str> = sources.iter().map(|s| &*s.text).collect();
        assert_eq!(texts, vec!["one", "two", "ten"]);
    }

    #[test]
    fn test_load_working_set_requires_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_working_set(&temp_dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("wordfreq generate"));
    }
}
