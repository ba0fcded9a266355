use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::paths::{BuildGlobs, glob_sorted};

#[derive(Debug, Deserialize)]
struct PackageName {
    name: Option<String>,
}

/// Resolver aliases pointing each component package at its sources.
///
/// Every `component.base` match holding both `package.json` and `src/`
/// contributes `"<package name>$"` → `<match>/src`. Packages without a
/// readable name are skipped.
pub fn alias_map(globs: &BuildGlobs, base: &Path) -> Result<IndexMap<String, PathBuf>> {
    let mut aliases = IndexMap::new();
    for set in globs.sets() {
        let Some(component) = &set.component else {
            continue;
        };
        for package_dir in glob_sorted(base, Path::new(&component.base))? {
            let package_json = package_dir.join("package.json");
            let src = package_dir.join("src");
            if !package_json.is_file() || !src.is_dir() {
                continue;
            }
            match read_package_name(&package_json) {
                Some(name) => {
                    debug!(package = %name, src = %src.display(), "alias");
                    aliases.insert(format!("{name}$"), src);
                }
                None => warn!(path = %package_json.display(), "package.json has no readable name"),
            }
        }
    }
    Ok(aliases)
}

fn read_package_name(package_json: &Path) -> Option<String> {
    let content = fs::read_to_string(package_json).ok()?;
    serde_json::from_str::<PackageName>(&content).ok()?.name
}
