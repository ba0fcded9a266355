//! Static module crawler.
//!
//! Produces the same [`BundlerModule`] list a bundler would report, by walking
//! relative imports from a set of entry files. Bare specifiers (packages) are
//! treated as external and never visited.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use oxc_resolver::{ResolveOptions, Resolver};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use crate::error::{GraphError, Result};
use crate::module::{BundlerModule, ModuleDependency, absolutize};
use crate::structure::{ModuleStructure, parse_module_structure, script_source_type};

/// Default cap on visited modules.
pub const DEFAULT_MAX_MODULES: usize = 10_000;

/// Crawler configuration.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Directory relative entry paths are resolved against.
    pub cwd: PathBuf,
    pub max_modules: usize,
}

impl CrawlOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            max_modules: DEFAULT_MAX_MODULES,
        }
    }
}

/// Breadth-first crawler over local modules.
pub struct ModuleCrawler {
    options: CrawlOptions,
    resolver: Resolver,
}

impl ModuleCrawler {
    pub fn new(options: CrawlOptions) -> Self {
        let resolver = Resolver::new(ResolveOptions {
            extensions: vec![
                ".tsx".into(),
                ".ts".into(),
                ".jsx".into(),
                ".js".into(),
                ".mjs".into(),
                ".md".into(),
                ".mdx".into(),
                ".json".into(),
            ],
            symlinks: false,
            ..Default::default()
        });
        Self { options, resolver }
    }

    /// Crawl from `entries` and return every reached module in visit order.
    ///
    /// Entry files must exist; any other unreadable module is kept without
    /// source text.
    pub fn crawl<P: AsRef<Path>>(&self, entries: &[P]) -> Result<Vec<BundlerModule>> {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut modules = Vec::new();
        let mut structures: FxHashMap<PathBuf, ModuleStructure> = FxHashMap::default();

        for entry in entries {
            let path = absolutize(&self.options.cwd, entry.as_ref());
            if !path.is_file() {
                return Err(GraphError::EntryNotFound { path });
            }
            queue.push_back(path);
        }

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if visited.len() > self.options.max_modules {
                return Err(GraphError::TooManyModules {
                    count: visited.len(),
                    max: self.options.max_modules,
                });
            }

            let is_entry = entries
                .iter()
                .any(|entry| absolutize(&self.options.cwd, entry.as_ref()) == current);
            let source = match fs::read_to_string(&current) {
                Ok(source) => Some(source),
                Err(source) if is_entry => {
                    return Err(GraphError::ReadFile {
                        path: current,
                        source,
                    });
                }
                Err(error) => {
                    warn!(path = %current.display(), %error, "failed to read module");
                    None
                }
            };

            let mut module = BundlerModule::new(current.clone());
            match (&source, script_source_type(&current)) {
                (Some(code), Some(_)) => {
                    let structure = parse_module_structure(&current, code);
                    module.dependencies = self.resolve_requests(&current, &structure.requests);
                    for dependency in &module.dependencies {
                        if !visited.contains(&dependency.resolved) {
                            queue.push_back(dependency.resolved.clone());
                        }
                    }
                    structures.insert(current.clone(), structure);
                }
                // Assets and documents behave like modules with a single default export.
                _ => module.provided_exports = Some(vec!["default".to_string()]),
            }
            module.source = source;
            modules.push(module);
        }

        compute_provided_exports(&mut modules, &structures);
        info!(modules = modules.len(), "crawled module graph");
        Ok(modules)
    }

    fn resolve_requests(&self, from: &Path, requests: &[String]) -> Vec<ModuleDependency> {
        let dir = from.parent().unwrap_or(from);
        requests
            .iter()
            .filter_map(|request| {
                if !is_relative_request(request) {
                    debug!(from = %from.display(), request = %request, "skipping external request");
                    return None;
                }
                match self.resolver.resolve(dir, request) {
                    Ok(resolution) => Some(ModuleDependency {
                        request: request.clone(),
                        resolved: absolutize(dir, resolution.path()),
                    }),
                    Err(error) => {
                        debug!(from = %from.display(), request = %request, ?error, "unresolved request");
                        None
                    }
                }
            })
            .collect()
    }
}

fn is_relative_request(request: &str) -> bool {
    request.starts_with("./") || request.starts_with("../") || request.starts_with('/') || request == "."
}

/// Declared names plus everything reachable through `export *` (never `default`).
fn compute_provided_exports(
    modules: &mut [BundlerModule],
    structures: &FxHashMap<PathBuf, ModuleStructure>,
) {
    let dependencies: FxHashMap<PathBuf, Vec<ModuleDependency>> = modules
        .iter()
        .map(|module| (module.path.clone(), module.dependencies.clone()))
        .collect();

    for module in modules.iter_mut() {
        if module.provided_exports.is_some() {
            continue;
        }
        let mut names = Vec::new();
        let mut seen = FxHashSet::default();
        collect_names(&module.path, structures, &dependencies, &mut seen, &mut names, true);
        module.provided_exports = Some(names);
    }
}

fn collect_names(
    path: &Path,
    structures: &FxHashMap<PathBuf, ModuleStructure>,
    dependencies: &FxHashMap<PathBuf, Vec<ModuleDependency>>,
    seen: &mut FxHashSet<PathBuf>,
    names: &mut Vec<String>,
    include_default: bool,
) {
    if !seen.insert(path.to_path_buf()) {
        return;
    }
    let Some(structure) = structures.get(path) else {
        return;
    };
    for name in structure.export_names() {
        if (include_default || name != "default") && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    let Some(deps) = dependencies.get(path) else {
        return;
    };
    for request in &structure.star_sources {
        if let Some(dependency) = deps.iter().find(|d| &d.request == request) {
            collect_names(&dependency.resolved, structures, dependencies, seen, names, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn crawls_relative_imports_and_skips_packages() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let entry = write(
            root,
            "src/index.js",
            "import React from 'react';\nimport * as a from './a';\nimport doc from './README.md';\nexport const A = { ...a, doc };\n",
        );
        write(root, "src/a.tsx", "export const Basic = () => null;\n");
        write(root, "src/README.md", "# Title\n");

        let crawler = ModuleCrawler::new(CrawlOptions::new(root));
        let modules = crawler.crawl(&[&entry]).unwrap();

        let paths: Vec<_> = modules.iter().map(|m| m.path.clone()).collect();
        assert_eq!(
            paths,
            vec![entry.clone(), root.join("src/a.tsx"), root.join("src/README.md")]
        );
        assert_eq!(modules[0].dependencies.len(), 2);
        assert_eq!(modules[0].provided_exports, Some(vec!["A".to_string()]));
        assert_eq!(modules[2].provided_exports, Some(vec!["default".to_string()]));
        assert_eq!(modules[2].source.as_deref(), Some("# Title\n"));
    }

    #[test]
    fn star_exports_are_followed_without_looping() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let entry = write(root, "a.js", "export * from './b';\nexport const A = 1;\nexport default A;\n");
        write(root, "b.js", "export * from './a';\nexport const B = 2;\nexport default B;\n");

        let modules = ModuleCrawler::new(CrawlOptions::new(root))
            .crawl(&[&entry])
            .unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(
            modules[0].provided_exports,
            Some(vec!["A".to_string(), "default".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn missing_entry_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = ModuleCrawler::new(CrawlOptions::new(temp.path())).crawl(&["missing.js"]);
        assert!(matches!(result, Err(GraphError::EntryNotFound { .. })));
    }

    #[test]
    fn module_cap_is_enforced() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let entry = write(root, "a.js", "import './b';\n");
        write(root, "b.js", "export const b = 1;\n");
        let mut options = CrawlOptions::new(root);
        options.max_modules = 1;
        let result = ModuleCrawler::new(options).crawl(&[&entry]);
        assert!(matches!(result, Err(GraphError::TooManyModules { .. })));
    }
}
