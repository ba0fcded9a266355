//! Per-chunk module-info aggregation.
//!
//! The chunk entry's exports are submodules. Each submodule points at a doc
//! entry (`doc` key) and a component entry (`component` key); the component
//! entry's exports in turn point at demo files whose own exports are demos.

use std::path::{Path, PathBuf};

use docsite_comments::{NormalizedComment, RawComment, extract_comments_from_path, normalize_all};
use docsite_graph::{ExportEntry, ModuleExportMap};
use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::model::{
    ChunkInfo, ComponentInfo, ComponentMeta, DemoInfo, DocInfo, DocMeta, ModuleInfoMap,
    SubmoduleInfo,
};
use crate::paths::SitePaths;
use crate::title::TitleSource;
use crate::umd::UmdProbe;

/// Raw doc comments of every demo file, keyed by path.
pub type DemoComments = IndexMap<PathBuf, Vec<RawComment>>;

/// Read and parse the comments of every demo file.
///
/// Files are processed in parallel; the result keeps the input order.
pub fn parse_demo_comments<'a, I>(paths: I) -> DemoComments
where
    I: IntoIterator<Item = &'a Path>,
{
    let paths: Vec<&Path> = paths.into_iter().collect();
    let parsed: Vec<Vec<RawComment>> = paths
        .par_iter()
        .map(|path| extract_comments_from_path(path))
        .collect();
    paths
        .into_iter()
        .map(Path::to_path_buf)
        .zip(parsed)
        .collect()
}

/// Builds module-info trees from a finished export map.
pub struct Aggregator<'a> {
    pub paths: &'a SitePaths,
    pub titles: &'a dyn TitleSource,
    pub umd: &'a dyn UmdProbe,
    /// Language used when a comment has no value for the chunk language.
    pub default_language: &'a str,
}

type NormalizedComments<'c> = FxHashMap<&'c Path, Vec<NormalizedComment>>;

impl<'a> Aggregator<'a> {
    /// Aggregate every chunk whose entry is present in `export_map`.
    ///
    /// Chunks with an unknown entry get no key in the result at all.
    pub fn aggregate(
        &self,
        chunks: &[ChunkInfo],
        export_map: &ModuleExportMap,
        comments: &DemoComments,
    ) -> ModuleInfoMap {
        let mut result = ModuleInfoMap::new();
        for chunk in chunks {
            let Some(submodules) = export_map.get(&chunk.entry) else {
                debug!(chunk = %chunk.name, entry = %chunk.entry.display(), "chunk entry not in export map");
                continue;
            };

            let normalized: NormalizedComments<'_> = comments
                .iter()
                .map(|(path, raw)| {
                    (
                        path.as_path(),
                        normalize_all(raw, &chunk.name, self.default_language),
                    )
                })
                .collect();

            let tree: Vec<SubmoduleInfo> = submodules
                .iter()
                .filter_map(|submodule| self.submodule(submodule, export_map, &normalized))
                .collect();
            info!(chunk = %chunk.name, submodules = tree.len(), "aggregated module info");
            result.insert(chunk.name.clone(), tree);
        }
        result
    }

    fn submodule(
        &self,
        submodule: &ExportEntry,
        export_map: &ModuleExportMap,
        comments: &NormalizedComments<'_>,
    ) -> Option<SubmoduleInfo> {
        let docs = submodule
            .keyed("doc")
            .and_then(|dependency| export_map.get(&dependency.path));
        let components = submodule
            .keyed("component")
            .and_then(|dependency| export_map.get(&dependency.path));
        if docs.is_none() && components.is_none() {
            debug!(submodule = %submodule.name, "skipping export without doc or component entry");
            return None;
        }

        let doc = docs
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| self.doc(entry))
            .collect();
        let component = components
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| self.component(entry, export_map, comments))
            .collect();

        Some(SubmoduleInfo {
            key: submodule.name.clone(),
            doc,
            component,
        })
    }

    fn doc(&self, entry: &ExportEntry) -> Option<DocInfo> {
        let document = entry.find_dependency(|path| self.paths.is_doc(path))?;
        Some(DocInfo {
            name: entry.name.clone(),
            is_doc: true,
            info: DocMeta {
                name: self.titles.title(&document.path),
            },
        })
    }

    fn component(
        &self,
        entry: &ExportEntry,
        export_map: &ModuleExportMap,
        comments: &NormalizedComments<'_>,
    ) -> Option<ComponentInfo> {
        let demo_entry = entry.find_dependency(|path| self.paths.is_demo(path))?;
        let demos = export_map.get(&demo_entry.path)?;
        let comments = comments
            .get(demo_entry.path.as_path())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let fields = comments.first().cloned().unwrap_or_default();
        let demo_comments = demo_comments(comments, demos.len());
        let children = demos
            .iter()
            .enumerate()
            .map(|(index, demo)| DemoInfo {
                name: demo.name.clone(),
                raw_code: demo
                    .dependencies
                    .first()
                    .and_then(|dependency| dependency.raw_code.clone())
                    .unwrap_or_default(),
                info: demo_comments.get(index).cloned().unwrap_or_default(),
            })
            .collect();

        Some(ComponentInfo {
            name: entry.name.clone(),
            info: ComponentMeta::new(fields, self.umd.probe(&demo_entry.path).into_attachable()),
            children,
        })
    }
}

/// Comments assigned to `count` demos: the last `count` comments of the file.
///
/// A file with fewer comments than demos hands all of them out in order,
/// header included; the remaining demos get empty info.
fn demo_comments(comments: &[NormalizedComment], count: usize) -> &[NormalizedComment] {
    &comments[comments.len().saturating_sub(count)..]
}
