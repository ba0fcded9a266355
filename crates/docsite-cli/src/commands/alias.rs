//! `docsite alias`: print resolver aliases for component packages.

use crate::cli::SiteArgs;
use crate::commands::utils::load_site;
use crate::error::{BuildError, Result};
use crate::ui;
use docsite_info::alias_map;

pub fn execute(site_args: &SiteArgs) -> Result<()> {
    let site = load_site(site_args, &[])?;
    let aliases = alias_map(&site.config.build.globs, &site.root).map_err(BuildError::from)?;
    if aliases.is_empty() {
        ui::info("No component package with both package.json and src/ found");
    }
    println!("{}", serde_json::to_string_pretty(&aliases)?);
    Ok(())
}
