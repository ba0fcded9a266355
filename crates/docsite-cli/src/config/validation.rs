use crate::config::SiteConfig;
use crate::error::{ConfigError, Result};

impl SiteConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.site.languages.is_empty() {
            return Err(ConfigError::MissingField {
                field: "site.languages".to_string(),
                hint: "List at least one language, e.g. [\"zh-CN\", \"en-US\"]".to_string(),
            }
            .into());
        }

        if let Some(lang) = self.site.languages.iter().find(|lang| lang.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "site.languages".to_string(),
                value: format!("{lang:?}"),
                hint: "Language names cannot be empty".to_string(),
            }
            .into());
        }

        if self.site.default_language.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "site.defaultLanguage".to_string(),
                hint: "Set the language used when a comment has no localized value".to_string(),
            }
            .into());
        }

        if !self.build.output_filename.contains("[name]") {
            return Err(ConfigError::InvalidValue {
                field: "build.outputFilename".to_string(),
                value: self.build.output_filename.clone(),
                hint: "Include the [name] placeholder, e.g. index.[name].js".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
