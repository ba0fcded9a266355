use docsite_info::BuildGlobs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::defaults::*;

/// `build` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Doc and component patterns, relative to the site root
    #[serde(default)]
    pub globs: BuildGlobs,

    /// Directory holding the generated `index.<language>.js` entries
    #[serde(default = "default_entry_dir")]
    pub entry_dir: PathBuf,

    /// Emitted entry file name; `[name]` is the language
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            globs: BuildGlobs::default(),
            entry_dir: default_entry_dir(),
            output_filename: default_output_filename(),
        }
    }
}

/// `site` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteOptions {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Fallback language for comments without a localized variant
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            default_language: default_language(),
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteOverrides>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl ConfigOverrides {
    /// Overrides for `--lang`; an empty list overrides nothing.
    pub fn languages(languages: &[String]) -> Self {
        if languages.is_empty() {
            return Self::default();
        }
        Self {
            site: Some(SiteOverrides {
                languages: Some(languages.to_vec()),
            }),
        }
    }
}
