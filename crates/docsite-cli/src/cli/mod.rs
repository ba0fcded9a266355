//! Command-line interface definition for docsite.
//!
//! # Command Structure
//!
//! - `docsite info` - Print the module info tree per language
//! - `docsite inject` - Write module info into built assets
//! - `docsite alias` - Print component package aliases

mod commands;

use clap::Parser;

pub use commands::{Command, InfoArgs, InjectArgs, SiteArgs};

/// docsite - module info for design-system documentation sites
#[derive(Parser, Debug)]
#[command(
    name = "docsite",
    version,
    about = "Module info for design-system documentation sites",
    long_about = "docsite collects documents, components and demos reachable from the\n\
                  generated per-language site entries, and injects the resulting module\n\
                  info into the built entry bundles."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
