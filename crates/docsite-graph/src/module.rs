use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

/// One module as reported by the host bundler once its graph is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerModule {
    /// Resolved module path, absolute or relative to the build context.
    pub path: PathBuf,
    /// Export names the bundler determined for this module, when known.
    pub provided_exports: Option<Vec<String>>,
    /// Original source text, when the bundler still holds it.
    pub source: Option<String>,
    /// Direct dependencies in request order.
    pub dependencies: Vec<ModuleDependency>,
}

/// A request made by a module together with the path it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDependency {
    pub request: String,
    pub resolved: PathBuf,
}

impl BundlerModule {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            provided_exports: None,
            source: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_provided_exports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provided_exports = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_dependency(mut self, request: impl Into<String>, resolved: impl Into<PathBuf>) -> Self {
        self.dependencies.push(ModuleDependency {
            request: request.into(),
            resolved: resolved.into(),
        });
        self
    }

    /// Path the given request resolved to, if the bundler recorded it.
    pub fn resolve_request(&self, request: &str) -> Option<&Path> {
        self.dependencies
            .iter()
            .find(|dependency| dependency.request == request)
            .map(|dependency| dependency.resolved.as_path())
    }

    /// Whether the bundler reports `name` as an export of this module.
    ///
    /// Unknown export lists accept every name.
    pub fn provides(&self, name: &str) -> bool {
        self.provided_exports
            .as_ref()
            .is_none_or(|names| names.iter().any(|provided| provided == name))
    }
}

/// Make `path` absolute against `base` and normalize `.`/`..` segments.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        base.join(path).clean()
    }
}
