use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value carried by a single doc tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Plain text shared by every language.
    Text(String),
    /// Text keyed by language identifier (e.g. `en-US`, `zh-CN`).
    Localized(IndexMap<String, String>),
}

impl TagValue {
    /// Returns the plain text, if this value is not language-keyed.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            TagValue::Localized(_) => None,
        }
    }

    /// Resolves the value for `target`, falling back to `default`, then to `""`.
    pub fn localize(&self, target: &str, default: &str) -> String {
        match self {
            TagValue::Text(text) => text.clone(),
            TagValue::Localized(values) => values
                .get(target)
                .or_else(|| values.get(default))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// One parsed `/** ... */` block from a demo or doc source file.
///
/// Tags keep the order in which they first appear in the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    /// File the comment was read from.
    pub source: PathBuf,
    /// Tag name to value, verbatim tag spelling.
    pub tags: IndexMap<String, TagValue>,
}

impl RawComment {
    /// Creates an empty comment for `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            tags: IndexMap::new(),
        }
    }

    /// Builder-style tag insertion, mostly useful in tests.
    pub fn with_tag(mut self, tag: impl Into<String>, value: TagValue) -> Self {
        self.tags.insert(tag.into(), value);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&TagValue> {
        self.tags.get(tag)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Flat field map of a comment resolved for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedComment(IndexMap<String, String>);

impl NormalizedComment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Remove `field`, keeping the order of the remaining fields.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.shift_remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NormalizedComment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
