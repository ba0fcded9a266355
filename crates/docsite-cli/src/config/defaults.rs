use std::path::PathBuf;

use crate::config::{BuildConfig, SiteConfig, SiteOptions};

pub fn default_entry_dir() -> PathBuf {
    PathBuf::from(".temp")
}

pub fn default_output_filename() -> String {
    docsite_info::ModuleInfoPluginOptions::default().output_filename
}

pub fn default_languages() -> Vec<String> {
    vec!["zh-CN".to_string(), "en-US".to_string()]
}

pub fn default_language() -> String {
    docsite_info::ModuleInfoPluginOptions::default().default_language
}

impl SiteConfig {
    /// Get default configuration values.
    pub(crate) fn default_config() -> Self {
        Self {
            build: BuildConfig::default(),
            site: SiteOptions::default(),
        }
    }
}
