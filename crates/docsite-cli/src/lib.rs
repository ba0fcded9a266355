#![deny(clippy::all)]
// Commands read entries and rewrite emitted assets on disk
#![allow(clippy::disallowed_methods)]

//! docsite CLI - module info for design-system documentation sites.
//!
//! Runs the [`docsite_info`] pipeline without a bundler: the generated
//! per-language entries are crawled with [`docsite_graph::ModuleCrawler`], and
//! the resulting module info is printed or injected into already-built assets.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal output helpers
//! - [`config`] - `docsite.config.json` loading and validation
//! - [`commands`] - `info`, `inject` and `alias`
//!
//! # Example
//!
//! ```rust,no_run
//! use docsite_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
