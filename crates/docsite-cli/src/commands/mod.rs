//! Command implementations for the docsite CLI.
//!
//! - [`info`] - Print aggregated module info
//! - [`inject`] - Patch module info into built assets
//! - [`alias`] - Print component package aliases
//!
//! Each command provides an `execute` function taking the shared site
//! arguments and its own parsed arguments.

pub mod alias;
pub mod info;
pub mod inject;
pub(crate) mod utils;

pub use alias::execute as alias_execute;
pub use info::execute as info_execute;
pub use inject::execute as inject_execute;
