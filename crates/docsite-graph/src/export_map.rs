//! Module Export Map: for every relevant module, its exports and the direct
//! dependencies that contributed to each of them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::{debug, info};

use crate::module::{BundlerModule, absolutize};
use crate::structure::{ModuleStructure, parse_module_structure, script_source_type};

/// A direct dependency that contributed to one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDependency {
    pub path: PathBuf,
    /// Property key the dependency was exported under (`doc`, `component`, ...).
    pub key: Option<String>,
    /// Source text of the dependency module, when the host still holds it.
    pub raw_code: Option<String>,
}

/// One named export of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub name: String,
    pub owner: PathBuf,
    pub dependencies: Vec<ExportDependency>,
}

impl ExportEntry {
    /// First dependency exported under `key`.
    pub fn keyed(&self, key: &str) -> Option<&ExportDependency> {
        self.dependencies
            .iter()
            .find(|dependency| dependency.key.as_deref() == Some(key))
    }

    /// First dependency whose path satisfies `predicate`, anonymous ones first.
    pub fn find_dependency<F>(&self, predicate: F) -> Option<&ExportDependency>
    where
        F: Fn(&Path) -> bool,
    {
        self.dependencies
            .iter()
            .filter(|dependency| predicate(&dependency.path))
            .min_by_key(|dependency| dependency.key.is_some())
    }
}

/// Insertion-ordered mapping from absolute module path to its exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModuleExportMap(IndexMap<PathBuf, Vec<ExportEntry>>);

impl ModuleExportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, exports: Vec<ExportEntry>) {
        self.0.insert(path.into(), exports);
    }

    pub fn get(&self, path: &Path) -> Option<&[ExportEntry]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.0.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[ExportEntry])> {
        self.0
            .iter()
            .map(|(path, exports)| (path.as_path(), exports.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Files and directory subtrees whose modules belong in the export map.
#[derive(Debug, Clone, Default)]
pub struct ValidPaths {
    files: FxHashSet<PathBuf>,
    roots: Vec<PathBuf>,
}

impl ValidPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.files.insert(path.as_ref().to_path_buf().clean());
    }

    /// Accept every path below `root`.
    pub fn add_root(&mut self, root: impl AsRef<Path>) {
        let root = root.as_ref().to_path_buf().clean();
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path) || self.roots.iter().any(|root| path.starts_with(root))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.roots.is_empty()
    }
}

impl<P: AsRef<Path>> FromIterator<P> for ValidPaths {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut paths = Self::new();
        for path in iter {
            paths.add_file(path);
        }
        paths
    }
}

/// Build the export map for every module under `valid`.
///
/// Relative module paths are resolved against `base_dir`. Attribution is one
/// hop only: an export re-exported through `export *` is credited to the
/// star source, never to whatever that module re-exports in turn.
pub fn build_export_map(
    base_dir: &Path,
    valid: &ValidPaths,
    modules: &[BundlerModule],
) -> ModuleExportMap {
    let by_path: FxHashMap<PathBuf, &BundlerModule> = modules
        .iter()
        .map(|module| (absolutize(base_dir, &module.path), module))
        .collect();

    let mut map = ModuleExportMap::new();
    for module in modules {
        let path = absolutize(base_dir, &module.path);
        if !valid.contains(&path) || map.contains(&path) {
            continue;
        }
        let exports = module_exports(base_dir, &path, module, &by_path);
        debug!(path = %path.display(), exports = exports.len(), "mapped module exports");
        map.insert(path, exports);
    }

    info!(modules = map.len(), "built module export map");
    map
}

fn module_exports(
    base_dir: &Path,
    path: &Path,
    module: &BundlerModule,
    by_path: &FxHashMap<PathBuf, &BundlerModule>,
) -> Vec<ExportEntry> {
    let structure = match (&module.source, script_source_type(path)) {
        (Some(source), Some(_)) => parse_module_structure(path, source),
        _ => ModuleStructure::default(),
    };

    let resolve = |request: &str| -> Option<PathBuf> {
        let resolved = module.resolve_request(request).map(|p| absolutize(base_dir, p));
        if resolved.is_none() {
            debug!(path = %path.display(), request, "dropping unresolved request");
        }
        resolved
    };

    let dependency = |resolved: PathBuf, key: Option<String>| -> ExportDependency {
        let raw_code = by_path
            .get(&resolved)
            .and_then(|target| target.source.clone());
        ExportDependency {
            path: resolved,
            key,
            raw_code,
        }
    };

    let mut entries = Vec::new();
    for local in &structure.exports {
        if !module.provides(&local.name) {
            continue;
        }
        let dependencies = local
            .sources
            .iter()
            .filter_map(|source| {
                resolve(&source.request).map(|resolved| dependency(resolved, source.key.clone()))
            })
            .collect();
        entries.push(ExportEntry {
            name: local.name.clone(),
            owner: path.to_path_buf(),
            dependencies,
        });
    }

    let Some(provided) = &module.provided_exports else {
        return entries;
    };

    let star_targets: Vec<PathBuf> = structure
        .star_sources
        .iter()
        .filter_map(|request| resolve(request))
        .collect();

    for name in provided {
        if structure.declares(name) {
            continue;
        }
        let dependencies = star_targets
            .iter()
            .filter(|target| {
                by_path
                    .get(target.as_path())
                    .is_none_or(|module| module.provides(name))
            })
            .map(|target| dependency(target.clone(), None))
            .collect();
        entries.push(ExportEntry {
            name: name.clone(),
            owner: path.to_path_buf(),
            dependencies,
        });
    }

    entries
}
