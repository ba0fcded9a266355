use std::path::PathBuf;

use thiserror::Error;

/// Errors from the parts of the pipeline that can legitimately fail.
///
/// The build phases themselves never return these; they log and degrade.
#[derive(Debug, Error)]
pub enum InfoError {
    /// A configured glob pattern is syntactically invalid.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The glob configuration has an unsupported shape.
    #[error("invalid glob configuration: {0}")]
    GlobConfig(String),

    /// Module info could not be serialized.
    #[error("failed to serialize module info: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = InfoError> = std::result::Result<T, E>;
