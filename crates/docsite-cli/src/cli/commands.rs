use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available docsite subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print module info for each language
    ///
    /// Crawls the generated entries and prints the aggregated tree of
    /// documents, components and demos as JSON.
    Info(InfoArgs),

    /// Inject module info into built assets
    ///
    /// Replaces the module info placeholder in each language's emitted entry
    /// bundle under DIST.
    Inject(InjectArgs),

    /// Print resolver aliases for component packages
    ///
    /// Maps `<package name>$` to the package's `src` directory for every
    /// component directory holding both.
    Alias,
}

/// Site location, shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Site root directory
    ///
    /// Globs, the entry directory and `docsite.config.json` are resolved
    /// against it. Defaults to the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to the config file
    ///
    /// When given, the file must exist. Otherwise `docsite.config.json` in the
    /// site root is used if present.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the info command
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    /// Languages to collect, overriding `site.languages`
    ///
    /// Examples:
    ///   docsite info --lang en-US
    ///   docsite info --lang zh-CN,en-US
    #[arg(short, long = "lang", value_name = "LANG", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Print the encoded string that is injected instead of the tree
    #[arg(long)]
    pub encoded: bool,
}

/// Arguments for the inject command
#[derive(Args, Debug)]
pub struct InjectArgs {
    /// Directory holding the built assets
    #[arg(value_name = "DIST")]
    pub dist: PathBuf,

    /// Languages to inject, overriding `site.languages`
    #[arg(short, long = "lang", value_name = "LANG", value_delimiter = ',')]
    pub languages: Vec<String>,
}
