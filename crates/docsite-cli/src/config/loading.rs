use crate::cli::SiteArgs;
use crate::config::{ConfigOverrides, SiteConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::Path;
use tracing::debug;

/// Config file looked up in the site root.
pub const CONFIG_FILE: &str = "docsite.config.json";

/// Prefix of environment overrides, e.g. `DOCSITE_SITE__DEFAULT_LANGUAGE`.
pub const ENV_PREFIX: &str = "DOCSITE_";

/// Map an environment key (without prefix) to a config path.
///
/// `__` separates sections and snake_case becomes camelCase:
/// `SITE__DEFAULT_LANGUAGE` → `site.defaultLanguage`.
pub fn env_key(key: &str) -> String {
    key.split("__")
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            let mut upper = false;
            for c in segment.chars() {
                if c == '_' {
                    upper = !out.is_empty();
                } else if upper {
                    out.extend(c.to_uppercase());
                    upper = false;
                } else {
                    out.extend(c.to_lowercase());
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(".")
}

impl SiteConfig {
    /// Load configuration for the site at `root`.
    ///
    /// An explicit `--config` must exist; otherwise `docsite.config.json` in
    /// `root` is used when present.
    pub fn load(args: &SiteArgs, root: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = root.join(CONFIG_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .lowercase(false)
                .map(|key| env_key(key.as_str()).into()),
        );
        figment = figment.merge(Serialized::defaults(overrides));

        let config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: "Check docsite.config.json syntax and field types".to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
