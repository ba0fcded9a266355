//! Glob configuration and the concrete doc/demo paths it resolves to.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use path_clean::PathClean;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{InfoError, Result};

/// One set of doc/component patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobConfig {
    /// Pattern of standalone documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentGlob>,
    /// Named hook modules for the site runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<IndexMap<String, String>>,
}

/// Component directories and the files inside each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGlob {
    /// Pattern matching component directories.
    pub base: String,
    /// Demo entry, relative to each component directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// `build.globs`: a single set, a list of sets or named groups of sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BuildGlobs {
    Single(GlobConfig),
    List(Vec<GlobConfig>),
    Groups(IndexMap<String, GlobConfig>),
}

impl Default for BuildGlobs {
    fn default() -> Self {
        BuildGlobs::List(Vec::new())
    }
}

impl BuildGlobs {
    /// All pattern sets, in configuration order.
    pub fn sets(&self) -> Vec<&GlobConfig> {
        match self {
            BuildGlobs::Single(set) => vec![set],
            BuildGlobs::List(sets) => sets.iter().collect(),
            BuildGlobs::Groups(groups) => groups.values().collect(),
        }
    }

    /// Classify a raw JSON value.
    ///
    /// An object carrying `doc` or `component` is one set; any other object is a
    /// map of named groups.
    pub fn from_value(value: Value) -> Result<Self> {
        let invalid = |error: serde_json::Error| InfoError::GlobConfig(error.to_string());
        let is_single_set = value
            .as_object()
            .is_some_and(|object| object.contains_key("doc") || object.contains_key("component"));
        match value {
            Value::Array(_) => serde_json::from_value(value).map(BuildGlobs::List).map_err(invalid),
            Value::Object(_) if is_single_set => {
                serde_json::from_value(value).map(BuildGlobs::Single).map_err(invalid)
            }
            Value::Object(_) => serde_json::from_value(value).map(BuildGlobs::Groups).map_err(invalid),
            Value::Null => Ok(BuildGlobs::default()),
            other => Err(InfoError::GlobConfig(format!(
                "expected an object or array, found {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for BuildGlobs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        BuildGlobs::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Resolved doc and demo files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitePaths {
    doc: IndexSet<PathBuf>,
    demo: IndexSet<PathBuf>,
}

impl SitePaths {
    pub fn new<D, M>(doc: D, demo: M) -> Self
    where
        D: IntoIterator<Item = PathBuf>,
        M: IntoIterator<Item = PathBuf>,
    {
        Self {
            doc: doc.into_iter().map(|p| p.clean()).collect(),
            demo: demo.into_iter().map(|p| p.clean()).collect(),
        }
    }

    /// Expand every pattern set against `base`.
    ///
    /// Matches of each pattern are sorted, so results never depend on
    /// directory enumeration order.
    pub fn resolve(globs: &BuildGlobs, base: &Path) -> Result<Self> {
        let mut paths = SitePaths::default();
        for set in globs.sets() {
            if let Some(doc) = &set.doc {
                paths.doc.extend(glob_sorted(base, Path::new(doc))?);
            }
            if let Some(component) = &set.component {
                if let Some(demo) = &component.demo {
                    let pattern = Path::new(&component.base).join(demo);
                    paths.demo.extend(glob_sorted(base, &pattern)?);
                }
            }
        }
        debug!(docs = paths.doc.len(), demos = paths.demo.len(), "resolved site paths");
        Ok(paths)
    }

    pub fn is_doc(&self, path: &Path) -> bool {
        self.doc.contains(path)
    }

    pub fn is_demo(&self, path: &Path) -> bool {
        self.demo.contains(path)
    }

    pub fn docs(&self) -> impl Iterator<Item = &Path> {
        self.doc.iter().map(PathBuf::as_path)
    }

    pub fn demos(&self) -> impl Iterator<Item = &Path> {
        self.demo.iter().map(PathBuf::as_path)
    }
}

/// Sorted matches of `pattern` joined onto `base`.
pub(crate) fn glob_sorted(base: &Path, pattern: &Path) -> Result<Vec<PathBuf>> {
    let full = Path::new(&glob::Pattern::escape(&base.to_string_lossy())).join(pattern);
    let pattern = full.to_string_lossy().into_owned();
    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|source| InfoError::Glob {
            pattern: pattern.clone(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|path| path.clean())
        .collect();
    matches.sort();
    if matches.is_empty() {
        debug!(pattern = %pattern, "glob matched nothing");
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn classifies_all_three_shapes() {
        let single = json!({ "doc": "docs/**/*.md", "component": { "base": "components/*", "demo": "__demo__/index.tsx" } });
        assert!(matches!(BuildGlobs::from_value(single).unwrap(), BuildGlobs::Single(_)));

        let list = json!([{ "doc": "docs/*.md" }, { "component": { "base": "packages/*" } }]);
        let BuildGlobs::List(sets) = BuildGlobs::from_value(list).unwrap() else {
            panic!("expected list");
        };
        assert_eq!(sets.len(), 2);

        let groups = json!({ "general": { "doc": "docs/*.md" }, "data": { "component": { "base": "data/*" } } });
        let globs = BuildGlobs::from_value(groups).unwrap();
        let BuildGlobs::Groups(ref named) = globs else {
            panic!("expected groups");
        };
        assert_eq!(named.keys().collect::<Vec<_>>(), vec!["general", "data"]);
        assert_eq!(globs.sets().len(), 2);
    }

    #[test]
    fn rejects_scalars() {
        assert!(BuildGlobs::from_value(json!("docs/*.md")).is_err());
        assert!(matches!(
            BuildGlobs::from_value(json!({ "general": 3 })),
            Err(InfoError::GlobConfig(_))
        ));
    }

    #[test]
    fn deserializes_through_serde() {
        let globs: BuildGlobs = serde_json::from_str(r#"{"doc":"docs/*.md"}"#).unwrap();
        assert_eq!(
            globs,
            BuildGlobs::Single(GlobConfig {
                doc: Some("docs/*.md".into()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn resolves_sorted_doc_and_demo_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for rel in [
            "docs/b.md",
            "docs/a.md",
            "components/tag/__demo__/index.tsx",
            "components/button/__demo__/index.tsx",
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        // component without demos
        fs::create_dir_all(root.join("components/empty")).unwrap();

        let globs = BuildGlobs::Single(GlobConfig {
            doc: Some("docs/*.md".into()),
            component: Some(ComponentGlob {
                base: "components/*".into(),
                demo: Some("__demo__/index.tsx".into()),
                ..Default::default()
            }),
            hook: None,
        });
        let paths = SitePaths::resolve(&globs, root).unwrap();
        assert_eq!(
            paths.docs().collect::<Vec<_>>(),
            vec![root.join("docs/a.md"), root.join("docs/b.md")]
        );
        assert_eq!(
            paths.demos().collect::<Vec<_>>(),
            vec![
                root.join("components/button/__demo__/index.tsx"),
                root.join("components/tag/__demo__/index.tsx"),
            ]
        );
        assert!(paths.is_demo(&root.join("components/tag/__demo__/index.tsx")));
        assert!(!paths.is_doc(&root.join("components/tag/__demo__/index.tsx")));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let globs = BuildGlobs::Single(GlobConfig {
            doc: Some("docs/[*.md".into()),
            ..Default::default()
        });
        assert!(matches!(
            SitePaths::resolve(&globs, Path::new("/tmp")),
            Err(InfoError::Glob { .. })
        ));
    }

    #[test]
    fn root_with_glob_metacharacters_is_literal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site[v1]*");
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/intro.md"), "").unwrap();

        let globs = BuildGlobs::Single(GlobConfig {
            doc: Some("docs/*.md".into()),
            ..Default::default()
        });
        let paths = SitePaths::resolve(&globs, &root).unwrap();
        assert_eq!(paths.docs().collect::<Vec<_>>(), vec![root.join("docs/intro.md")]);
    }
}
