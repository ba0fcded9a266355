//! `docsite inject`: patch module info into built entry bundles.

use crate::cli::{InjectArgs, SiteArgs};
use crate::commands::utils::{graph_ready, load_site, resolve_path};
use crate::error::{BuildError, CliError, Result, ResultExt};
use crate::ui;
use docsite_info::AssetMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

pub fn execute(site_args: &SiteArgs, args: InjectArgs) -> Result<()> {
    let site = load_site(site_args, &args.languages)?;
    let dist = resolve_path(&args.dist, &site.root);
    if !dist.is_dir() {
        return Err(CliError::FileNotFound(dist));
    }

    let mut assets = collect_assets(&dist)?;
    debug!(assets = assets.len(), dist = %dist.display(), "collected assets");

    let mut phase = graph_ready(&site)?;
    let report = phase.plugin.on_assets_ready(&mut phase.ctx, &mut assets);
    if report.is_empty() {
        ui::warning(&format!(
            "No module info placeholder found in {}",
            dist.display()
        ));
        return Ok(());
    }

    let mut summary = Vec::with_capacity(report.patched.len());
    for file in &report.patched {
        let Some(contents) = assets.get(file.as_str()) else {
            continue;
        };
        let path = dist.join(file);
        fs::write(&path, contents)
            .map_err(|e| BuildError::AssetWriteFailed(format!("{}: {e}", path.display())))?;
        summary.push((file.clone(), contents.len() as u64));
    }

    ui::success(&format!(
        "Injected module info into {} file(s), {} placeholder(s) replaced",
        report.patched.len(),
        report.replaced
    ));
    ui::print_inject_summary(&summary);
    Ok(())
}

/// Every `.js` file below `dist`, keyed by its `/`-separated relative path.
fn collect_assets(dist: &Path) -> Result<AssetMap> {
    let pattern = dist.join("**").join("*.js");
    let pattern = pattern.to_string_lossy();
    let paths = glob::glob(&pattern)
        .map_err(|e| CliError::InvalidArgument(format!("Invalid asset directory: {e}")))?;

    let mut files: Vec<_> = paths.filter_map(std::result::Result::ok).collect();
    files.sort();

    let mut assets = AssetMap::with_capacity(files.len());
    for path in files {
        let Ok(relative) = path.strip_prefix(dist) else {
            continue;
        };
        let key = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        match fs::read_to_string(&path) {
            Ok(contents) => {
                assets.insert(key, contents);
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %path.display(), "skipping non UTF-8 asset");
            }
            Err(e) => return Err(e).with_path(&path),
        }
    }
    Ok(assets)
}
