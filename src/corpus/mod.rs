//! Corpus files: loading texts to count, generating and cleaning working sets
//!
//! A working set is a directory of `TextFile_<n>_tmp.txt` files, each built by
//! concatenating randomly picked base corpus files.

pub mod loader;
pub mod working_set;

pub use loader::{discover_files, load_source, load_sources, load_working_set};
pub use working_set::{GeneratedSet, WorkingSetSpec, clean, generate};
