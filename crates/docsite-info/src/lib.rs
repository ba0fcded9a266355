#![deny(clippy::all)]
// Probing reads package manifests, bundles and markdown files from disk
#![allow(clippy::disallowed_methods)]

//! # docsite-info
//!
//! Module-info pipeline for docsite builds.
//!
//! The host build drives [`ModuleInfoPlugin`] in two phases:
//!
//! 1. **Graph ready**: the bundler module list is turned into a
//!    [`docsite_graph::ModuleExportMap`] and every demo file's doc comments are
//!    parsed. The result is a [`BuildContext`].
//! 2. **Assets ready**: for each language chunk the export map is aggregated
//!    into a [`SubmoduleInfo`] tree, encoded with [`encode_info`] and written
//!    over the [`PLACEHOLDER`] token of the chunk's emitted entry.
//!
//! Nothing in either phase fails the build. Missing docs, demos or comments
//! shrink the tree instead.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use docsite_info::{AssetMap, BuildGlobs, ChunkInfo, ModuleInfoPlugin, SitePaths};
//!
//! # fn main() -> docsite_info::Result<()> {
//! let root = Path::new("/site");
//! let globs: BuildGlobs = serde_json::from_str(r#"{"doc":"docs/**/*.md"}"#)?;
//! let plugin = ModuleInfoPlugin::new(SitePaths::resolve(&globs, root)?, Default::default());
//!
//! let chunks = [ChunkInfo::new("zh-CN", ".temp/index.zh-CN.js")];
//! let mut ctx = plugin.on_graph_ready(root, &[], &chunks);
//! let mut assets = AssetMap::new();
//! let report = plugin.on_assets_ready(&mut ctx, &mut assets);
//! println!("patched {} files", report.patched.len());
//! # Ok(()) }
//! ```

pub mod aggregate;
pub mod alias;
pub mod codec;
pub mod entry;
pub mod error;
pub mod model;
pub mod patch;
pub mod paths;
pub mod plugin;
pub mod title;
pub mod umd;

#[cfg(feature = "logging")]
pub mod logging;

pub use aggregate::{Aggregator, DemoComments, parse_demo_comments};
pub use alias::alias_map;
pub use codec::{DECODER_SOURCE, decode_entries, decode_info, encode_info};
pub use entry::{EntryExpr, EntryModule, PreviewLink};
pub use error::{InfoError, Result};
pub use model::{
    ChunkInfo, ComponentInfo, ComponentMeta, DemoInfo, DocInfo, DocMeta, ModuleInfoMap,
    SubmoduleInfo, UmdInfo,
};
pub use patch::{PLACEHOLDER, count_placeholders, patch_asset};
pub use paths::{BuildGlobs, ComponentGlob, GlobConfig, SitePaths};
pub use plugin::{
    AssetMap, BuildContext, ModuleInfoPlugin, ModuleInfoPluginOptions, PatchReport,
    language_chunks,
};
pub use title::{MarkdownTitle, TitleSource};
pub use umd::{NoUmd, PackageUmdProbe, UmdProbe};
