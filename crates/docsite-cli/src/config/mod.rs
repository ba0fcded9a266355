//! Site configuration with multi-source loading.
//!
//! Merges settings from CLI args, environment variables and
//! `docsite.config.json`. Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod types;
mod validation;

use serde::{Deserialize, Serialize};

pub use defaults::*;
pub use loading::{CONFIG_FILE, ENV_PREFIX, env_key};
pub use types::*;

/// docsite configuration, loaded from `docsite.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Entry generation and doc/demo globs
    #[serde(default)]
    pub build: BuildConfig,

    /// Languages the site is built for
    #[serde(default)]
    pub site: SiteOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl SiteConfig {
    /// Options for the module-info plugin.
    pub fn plugin_options(&self) -> docsite_info::ModuleInfoPluginOptions {
        docsite_info::ModuleInfoPluginOptions {
            default_language: self.site.default_language.clone(),
            output_filename: self.build.output_filename.clone(),
        }
    }
}
