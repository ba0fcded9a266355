use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while crawling modules from disk.
///
/// Building the export map itself never fails; only the static crawler, which
/// has to read entry files, reports errors.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Entry module not found: {path}")]
    EntryNotFound { path: PathBuf },

    #[error("Too many modules: {count} exceeds maximum {max}")]
    TooManyModules { count: usize, max: usize },
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
