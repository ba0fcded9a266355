//! `docsite info`: print the aggregated module info.

use crate::cli::{InfoArgs, SiteArgs};
use crate::commands::utils::{graph_ready, load_site};
use crate::error::{BuildError, Result};
use docsite_info::encode_info;
use indexmap::IndexMap;
use tracing::info;

/// Print module info per language as JSON on stdout.
///
/// With `--encoded`, each language maps to the string that replaces the
/// placeholder in its entry bundle.
pub fn execute(site_args: &SiteArgs, args: InfoArgs) -> Result<()> {
    let site = load_site(site_args, &args.languages)?;
    let phase = graph_ready(&site)?;
    let module_info = phase.plugin.module_info(&phase.ctx);
    info!(languages = module_info.len(), "collected module info");

    let output = if args.encoded {
        let mut encoded = IndexMap::with_capacity(module_info.len());
        for (language, tree) in &module_info {
            encoded.insert(language, encode_info(tree).map_err(BuildError::from)?);
        }
        serde_json::to_string_pretty(&encoded)?
    } else {
        serde_json::to_string_pretty(&module_info)?
    };
    println!("{output}");
    Ok(())
}
