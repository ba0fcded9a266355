#![deny(clippy::all)]
// The static crawler reads module sources straight from disk
#![allow(clippy::disallowed_methods)]

//! # docsite-graph
//!
//! Module export graph used to correlate generated docsite entries with the doc
//! and demo files they pull in.
//!
//! Two sources of modules are supported:
//!
//! 1. **Bundler mode**: the host build reports its finalized module list as
//!    [`BundlerModule`] values.
//! 2. **Analysis mode**: [`ModuleCrawler`] walks relative imports from the entry
//!    files and produces the same list without a bundler.
//!
//! Either list feeds [`build_export_map`], which records for each module under
//! the [`ValidPaths`] set which direct dependency contributed each export, and
//! under which object key (`doc`, `component`, ...).
//!
//! ```rust,no_run
//! use std::path::Path;
//! use docsite_graph::{BundlerModule, ValidPaths, build_export_map};
//!
//! let modules = vec![
//!     BundlerModule::new("/site/.temp/index.zh-CN.js")
//!         .with_source("import * as a from './a.js';\nexport const general = { doc: a };")
//!         .with_dependency("./a.js", "/site/.temp/a.js"),
//! ];
//! let mut valid = ValidPaths::new();
//! valid.add_root("/site/.temp");
//! let map = build_export_map(Path::new("/site"), &valid, &modules);
//! assert!(map.contains(Path::new("/site/.temp/index.zh-CN.js")));
//! ```

pub mod crawl;
pub mod error;
pub mod export_map;
pub mod module;
pub mod structure;

pub use crawl::{CrawlOptions, ModuleCrawler};
pub use error::{GraphError, Result};
pub use export_map::{ExportDependency, ExportEntry, ModuleExportMap, ValidPaths, build_export_map};
pub use module::{BundlerModule, ModuleDependency, absolutize};
pub use structure::{ModuleStructure, parse_module_structure};
