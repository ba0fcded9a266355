//! Module-info tree produced per chunk.
//!
//! Field names follow the shape the site runtime decodes (`isDoc`, `rawCode`).

use std::path::PathBuf;

use docsite_comments::NormalizedComment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregated tree of every chunk, keyed by chunk name.
pub type ModuleInfoMap = IndexMap<String, Vec<SubmoduleInfo>>;

/// One bundler output target; chunks are named after their language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkInfo {
    pub name: String,
    pub entry: PathBuf,
    /// Emitted file names, known only once assets are finalized.
    #[serde(default)]
    pub files: Vec<String>,
}

impl ChunkInfo {
    pub fn new(name: impl Into<String>, entry: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            entry: entry.into(),
            files: Vec::new(),
        }
    }
}

/// Docs and components grouped under one export of the chunk entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleInfo {
    pub key: String,
    pub doc: Vec<DocInfo>,
    pub component: Vec<ComponentInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocInfo {
    pub name: String,
    pub is_doc: bool,
    pub info: DocMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Display title of the document.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub name: String,
    pub info: ComponentMeta,
    pub children: Vec<DemoInfo>,
}

/// Header comment fields of a demo file plus optional UMD details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMeta {
    #[serde(flatten)]
    pub fields: NormalizedComment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umd: Option<UmdInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoInfo {
    pub name: String,
    pub raw_code: String,
    pub info: NormalizedComment,
}

impl ComponentMeta {
    /// Component info from the header comment and the probed bundle.
    ///
    /// A `umd` field of the comment is dropped: the key belongs to the probe
    /// result, attached or not.
    pub fn new(mut fields: NormalizedComment, umd: Option<UmdInfo>) -> Self {
        if fields.remove("umd").is_some() {
            debug!("ignoring umd field of component comment");
        }
        Self { fields, umd }
    }
}

/// Prebuilt single-file bundle details for a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmdInfo {
    pub distributable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Bundle size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
}

impl UmdInfo {
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Only distributable bundles are attached to output.
    pub fn into_attachable(self) -> Option<Self> {
        self.distributable.then_some(self)
    }
}
