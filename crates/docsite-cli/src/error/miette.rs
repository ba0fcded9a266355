//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError};
use docsite_graph::GraphError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::Graph(GraphError::EntryNotFound { path }) => {
            miette::miette!(
                "Entry module not found: {}\n\nHint: Regenerate the site entries before running docsite",
                path.display()
            )
        }
        BuildError::Graph(GraphError::TooManyModules { count, max }) => {
            miette::miette!(
                "Module graph too large: {} modules (limit {})\n\nHint: Check that the entry directory does not import node_modules sources",
                count,
                max
            )
        }
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_entry_not_found_carries_hint() {
        let err = BuildError::Graph(GraphError::EntryNotFound {
            path: PathBuf::from("/site/.temp/index.zh-CN.js"),
        });
        let report = build_error_to_miette(err).to_string();
        assert!(report.contains("/site/.temp/index.zh-CN.js"));
        assert!(report.contains("Hint:"));
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let err = CliError::InvalidArgument("--lang must not be empty".into());
        assert_eq!(
            cli_error_to_miette(err).to_string(),
            "Invalid argument: --lang must not be empty"
        );
    }
}
