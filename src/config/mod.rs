//! Configuration management for wordfreq
//!
//! Settings are layered with figment (see [`core`]) and extracted into the
//! typed structures below. Every field has a default, so a partial file only
//! needs the keys it changes.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub mod core;
pub mod formats;

pub use formats::ConfigFormat;

/// Main configuration structure for wordfreq
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WordfreqConfig {
    /// Counting and ranking behaviour
    pub counter: CounterSettings,

    /// Where working files live and how they are generated
    pub corpus: CorpusSettings,
}

/// Most words an execution record keeps at either end of the ranking
pub const MAX_TOP_WORDS: usize = 5;

/// Counting and ranking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSettings {
    /// How many most/least frequent words each execution record keeps (1-5)
    pub top_words: usize,

    /// Maximum number of worker threads (0 = no limit)
    pub max_threads: usize,

    /// Percentage of CPU cores to use for parallel runs (1-100)
    pub thread_percentage: u8,

    /// Show progress bars while counting
    pub progress: bool,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            top_words: 5,
            max_threads: 0,
            thread_percentage: 100,
            progress: true,
        }
    }
}

/// Working-set settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// Directory holding the base corpus files
    pub base_dir: String,

    /// Directory generated working files are written to and counted from
    pub working_dir: String,

    /// Number of working files to generate
    pub files: usize,

    /// Size of each working file in kb
    pub size_kb: u64,

    /// Nominal size of one base corpus file in kb
    pub base_file_kb: u64,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            base_dir: "text".to_string(),
            working_dir: "text".to_string(),
            files: 100,
            size_kb: 256,
            base_file_kb: 4,
        }
    }
}

impl WordfreqConfig {
    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TOP_WORDS).contains(&self.counter.top_words) {
            bail!(
                "counter.top_words must be between 1 and {}, got {}",
                MAX_TOP_WORDS,
                self.counter.top_words
            );
        }
        if !(1..=100).contains(&self.counter.thread_percentage) {
            bail!(
                "counter.thread_percentage must be between 1 and 100, got {}",
                self.counter.thread_percentage
            );
        }
        if self.corpus.base_file_kb == 0 {
            bail!("corpus.base_file_kb must be greater than 0");
        }
        Ok(())
    }

    /// Render the configuration in the requested format
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        format.serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WordfreqConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.counter.top_words, 5);
        assert_eq!(config.corpus.files, 100);
        assert_eq!(config.corpus.size_kb, 256);
    }

    #[test]
    fn test_validate_rejects_bad_thread_percentage() {
        let mut config = WordfreqConfig::default();
        config.counter.thread_percentage = 0;
        assert!(config.validate().is_err());

        config.counter.thread_percentage = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thread_percentage"));
    }

    #[test]
    fn test_validate_bounds_top_words() {
        let mut config = WordfreqConfig::default();
        config.counter.top_words = MAX_TOP_WORDS;
        assert!(config.validate().is_ok());

        config.counter.top_words = 0;
        assert!(config.validate().is_err());

        config.counter.top_words = 8;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("counter.top_words"));
    }

    #[test]
    fn test_validate_rejects_zero_base_file_size() {
        let mut config = WordfreqConfig::default();
        config.corpus.base_file_kb = 0;
        assert!(config.validate().is_err());
    }
}
