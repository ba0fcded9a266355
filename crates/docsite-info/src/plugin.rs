//! Two-phase build integration.
//!
//! The host build calls [`ModuleInfoPlugin::on_graph_ready`] once its module
//! graph is final, then [`ModuleInfoPlugin::on_assets_ready`] (or the legacy
//! [`ModuleInfoPlugin::emit`]) once output assets exist. Neither phase fails:
//! problems are logged and the affected metadata is left out.

use std::path::Path;

use docsite_graph::{BundlerModule, ModuleExportMap, ValidPaths, absolutize, build_export_map};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::aggregate::{Aggregator, DemoComments, parse_demo_comments};
use crate::codec::encode_info;
use crate::model::{ChunkInfo, ModuleInfoMap};
use crate::patch::{count_placeholders, patch_asset};
use crate::paths::SitePaths;
use crate::title::{MarkdownTitle, TitleSource};
use crate::umd::{PackageUmdProbe, UmdProbe};

/// Emitted file name → file contents.
pub type AssetMap = IndexMap<String, String>;

/// Configuration for [`ModuleInfoPlugin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfoPluginOptions {
    /// Language used when a comment lacks the chunk's language.
    pub default_language: String,
    /// Output file name template; `[name]` is the chunk name.
    pub output_filename: String,
}

impl Default for ModuleInfoPluginOptions {
    fn default() -> Self {
        Self {
            default_language: "zh-CN".to_string(),
            output_filename: "index.[name].js".to_string(),
        }
    }
}

impl ModuleInfoPluginOptions {
    /// File name the template yields for a chunk.
    pub fn output_file(&self, chunk_name: &str) -> String {
        self.output_filename.replace("[name]", chunk_name)
    }
}

/// State carried from the graph phase to the asset phase of one build.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    export_map: ModuleExportMap,
    chunks: Vec<ChunkInfo>,
    comments: DemoComments,
    injected: bool,
}

impl BuildContext {
    pub fn export_map(&self) -> &ModuleExportMap {
        &self.export_map
    }

    pub fn chunks(&self) -> &[ChunkInfo] {
        &self.chunks
    }

    pub fn comments(&self) -> &DemoComments {
        &self.comments
    }

    /// Whether module info has already been written into this build's assets.
    pub fn is_injected(&self) -> bool {
        self.injected
    }
}

/// Outcome of the asset phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Assets whose placeholder was replaced.
    pub patched: Vec<String>,
    /// Total placeholder occurrences replaced.
    pub replaced: usize,
}

impl PatchReport {
    pub fn is_empty(&self) -> bool {
        self.patched.is_empty()
    }
}

/// Collects module info during a build and injects it into emitted entries.
pub struct ModuleInfoPlugin {
    options: ModuleInfoPluginOptions,
    paths: SitePaths,
    titles: Box<dyn TitleSource>,
    umd: Box<dyn UmdProbe>,
}

impl ModuleInfoPlugin {
    pub fn new(paths: SitePaths, options: ModuleInfoPluginOptions) -> Self {
        Self {
            options,
            paths,
            titles: Box::new(MarkdownTitle),
            umd: Box::new(PackageUmdProbe),
        }
    }

    pub fn with_title_source(mut self, titles: impl TitleSource + 'static) -> Self {
        self.titles = Box::new(titles);
        self
    }

    pub fn with_umd_probe(mut self, umd: impl UmdProbe + 'static) -> Self {
        self.umd = Box::new(umd);
        self
    }

    pub fn name(&self) -> &'static str {
        "docsite-module-info"
    }

    pub fn options(&self) -> &ModuleInfoPluginOptions {
        &self.options
    }

    pub fn paths(&self) -> &SitePaths {
        &self.paths
    }

    /// Phase one: build the export map and parse every demo file's comments.
    ///
    /// Chunk entries inside `node_modules` are ignored. Everything below the
    /// directory of the first remaining entry counts as generated entry code.
    pub fn on_graph_ready(
        &self,
        base_dir: &Path,
        modules: &[BundlerModule],
        chunk_entries: &[ChunkInfo],
    ) -> BuildContext {
        let chunks: Vec<ChunkInfo> = chunk_entries
            .iter()
            .filter(|chunk| !is_dependency(&chunk.entry))
            .map(|chunk| ChunkInfo {
                entry: absolutize(base_dir, &chunk.entry),
                ..chunk.clone()
            })
            .collect();

        let mut valid: ValidPaths = self.paths.demos().collect();
        match chunks.first().and_then(|chunk| chunk.entry.parent()) {
            Some(entry_dir) => valid.add_root(entry_dir),
            None => warn!("no chunk entries outside node_modules; module info will be empty"),
        }

        let export_map = build_export_map(base_dir, &valid, modules);
        let comments = parse_demo_comments(self.paths.demos());
        info!(
            chunks = chunks.len(),
            modules = export_map.len(),
            demos = comments.len(),
            "module graph ready"
        );

        BuildContext {
            export_map,
            chunks,
            comments,
            injected: false,
        }
    }

    /// Aggregated module info of every chunk in `ctx`.
    pub fn module_info(&self, ctx: &BuildContext) -> ModuleInfoMap {
        Aggregator {
            paths: &self.paths,
            titles: self.titles.as_ref(),
            umd: self.umd.as_ref(),
            default_language: &self.options.default_language,
        }
        .aggregate(&ctx.chunks, &ctx.export_map, &ctx.comments)
    }

    /// Phase two: patch each chunk's output file, located by the file name
    /// template. Runs at most once per build.
    pub fn on_assets_ready(&self, ctx: &mut BuildContext, assets: &mut AssetMap) -> PatchReport {
        if ctx.injected {
            debug!("module info already injected");
            return PatchReport::default();
        }
        let module_info = self.module_info(ctx);
        let mut report = PatchReport::default();
        for chunk in &ctx.chunks {
            let file = self.options.output_file(&chunk.name);
            if let Some(encoded) = encode_chunk(&module_info, &chunk.name) {
                patch_file(assets, &file, &encoded, &mut report);
            }
        }
        ctx.injected = true;
        log_report(&report);
        report
    }

    /// Legacy asset phase: `chunk_files` maps chunk names to the files the
    /// host emitted for them. Skipped when [`Self::on_assets_ready`] already ran.
    pub fn emit(
        &self,
        ctx: &mut BuildContext,
        chunk_files: &IndexMap<String, Vec<String>>,
        assets: &mut AssetMap,
    ) -> PatchReport {
        if ctx.injected {
            debug!("module info already injected");
            return PatchReport::default();
        }
        for chunk in &mut ctx.chunks {
            if let Some(files) = chunk_files.get(&chunk.name) {
                chunk.files = files.clone();
            }
        }

        let module_info = self.module_info(ctx);
        let mut report = PatchReport::default();
        for chunk in &ctx.chunks {
            let Some(encoded) = encode_chunk(&module_info, &chunk.name) else {
                continue;
            };
            for file in chunk.files.iter().filter(|file| file.ends_with(".js")) {
                patch_file(assets, file, &encoded, &mut report);
            }
        }
        ctx.injected = true;
        log_report(&report);
        report
    }
}

fn is_dependency(entry: &Path) -> bool {
    entry
        .components()
        .any(|component| component.as_os_str() == "node_modules")
}

fn encode_chunk(module_info: &ModuleInfoMap, chunk: &str) -> Option<String> {
    let Some(tree) = module_info.get(chunk) else {
        debug!(chunk, "no module info for chunk");
        return None;
    };
    match encode_info(tree) {
        Ok(encoded) => Some(encoded),
        Err(error) => {
            warn!(chunk, %error, "failed to encode module info");
            None
        }
    }
}

fn patch_file(assets: &mut AssetMap, file: &str, encoded: &str, report: &mut PatchReport) {
    let Some(source) = assets.get_mut(file) else {
        debug!(file, "no emitted asset for chunk");
        return;
    };
    let count = count_placeholders(source);
    if count == 0 {
        return;
    }
    *source = patch_asset(source, encoded).into_owned();
    report.patched.push(file.to_string());
    report.replaced += count;
}

fn log_report(report: &PatchReport) {
    if report.is_empty() {
        warn!("no module info placeholder found in emitted assets");
    } else {
        info!(
            files = report.patched.len(),
            placeholders = report.replaced,
            "injected module info"
        );
    }
}

/// Chunk list for entries named `<entry_dir>/index.<lang>.js`.
pub fn language_chunks<S: AsRef<str>>(entry_dir: &Path, languages: &[S]) -> Vec<ChunkInfo> {
    languages
        .iter()
        .map(|lang| {
            let lang = lang.as_ref();
            ChunkInfo::new(lang, entry_dir.join(format!("index.{lang}.js")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn output_file_substitutes_chunk_name() {
        let options = ModuleInfoPluginOptions::default();
        assert_eq!(options.output_file("en-US"), "index.en-US.js");
    }

    #[test]
    fn node_modules_entries_are_dependencies() {
        assert!(is_dependency(Path::new("/site/node_modules/pkg/index.js")));
        assert!(!is_dependency(Path::new("/site/.temp/index.zh-CN.js")));
        assert!(!is_dependency(Path::new("/site/my_node_modules/index.js")));
    }

    #[test]
    fn entries_only_in_node_modules_leave_context_empty() {
        let plugin = ModuleInfoPlugin::new(SitePaths::default(), Default::default());
        let chunks = vec![ChunkInfo::new("vendor", "/site/node_modules/lib/index.js")];
        let mut ctx = plugin.on_graph_ready(Path::new("/site"), &[], &chunks);
        assert!(ctx.chunks().is_empty());

        let mut assets = AssetMap::new();
        assets.insert("index.vendor.js".into(), "'PLACEHOLDER_MODULE_INFO'".into());
        let report = plugin.on_assets_ready(&mut ctx, &mut assets);
        assert!(report.is_empty());
        assert!(ctx.is_injected());
    }

    #[test]
    fn language_chunks_follow_entry_naming() {
        let chunks = language_chunks(Path::new("/site/.temp"), &["zh-CN", "en-US"]);
        assert_eq!(chunks[1].name, "en-US");
        assert_eq!(chunks[1].entry, PathBuf::from("/site/.temp/index.en-US.js"));
    }
}
