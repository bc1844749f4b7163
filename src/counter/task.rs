use std::sync::Arc;

use super::table::FrequencyTable;
use super::tokenizer;

/// One file's already-loaded text and the identifier it was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub id: String,
    pub text: Arc<str>,
}

impl SourceText {
    pub fn new(id: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Text size in bytes
    pub fn size(&self) -> usize {
        self.text.len()
    }
}

/// Counts every token of one source into a shared table.
pub struct FileCountingTask<'a> {
    source: &'a SourceText,
    table: &'a FrequencyTable,
}

impl<'a> FileCountingTask<'a> {
    pub fn new(source: &'a SourceText, table: &'a FrequencyTable) -> Self {
        Self { source, table }
    }

    /// Feed every token into the table and return how many were counted
    pub fn run(&self) -> usize {
        tracing::trace!("Processing file {}", self.source.id);

        let mut tokens = 0;
        for word in tokenizer::split(&self.source.text) {
            self.table.increment(word);
            tokens += 1;
        }
        tokens
    }
}
