//! Shared utilities for command implementations.
//!
//! Loading the site and running the graph phase of the module-info pipeline
//! over the generated entries.

use crate::cli::SiteArgs;
use crate::config::{ConfigOverrides, SiteConfig};
use crate::error::{BuildError, CliError, Result};
use crate::ui;
use docsite_graph::{CrawlOptions, ModuleCrawler};
use docsite_info::{BuildContext, ChunkInfo, ModuleInfoPlugin, SitePaths, language_chunks};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Site root and its loaded configuration.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
}

/// Resolve the site root and load its configuration, with `languages`
/// overriding `site.languages` when non-empty.
pub fn load_site(args: &SiteArgs, languages: &[String]) -> Result<Site> {
    let current_dir = std::env::current_dir()?;
    let root = match &args.cwd {
        Some(cwd) => resolve_path(cwd, &current_dir),
        None => current_dir,
    };
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }

    let config = SiteConfig::load(args, &root, &ConfigOverrides::languages(languages))?;
    debug!(root = %root.display(), languages = ?config.site.languages, "site loaded");
    Ok(Site { root, config })
}

/// Plugin and build context after the graph phase.
pub struct GraphPhase {
    pub plugin: ModuleInfoPlugin,
    pub ctx: BuildContext,
}

/// Crawl the generated entries of every configured language and run the
/// graph phase over the result.
///
/// Languages without an entry file are skipped with a warning.
pub fn graph_ready(site: &Site) -> Result<GraphPhase> {
    let config = &site.config;
    let paths = SitePaths::resolve(&config.build.globs, &site.root).map_err(BuildError::from)?;

    let entry_dir = resolve_path(&config.build.entry_dir, &site.root);
    let (chunks, missing): (Vec<ChunkInfo>, Vec<ChunkInfo>) =
        language_chunks(&entry_dir, &config.site.languages)
            .into_iter()
            .partition(|chunk| chunk.entry.is_file());

    for chunk in &missing {
        ui::warning(&format!(
            "No entry for {} at {}, skipping",
            chunk.name,
            chunk.entry.display()
        ));
    }
    if chunks.is_empty() {
        return Err(BuildError::NoEntries(entry_dir).into());
    }

    let entries: Vec<&Path> = chunks.iter().map(|chunk| chunk.entry.as_path()).collect();
    let modules = ModuleCrawler::new(CrawlOptions::new(&site.root))
        .crawl(&entries)
        .map_err(BuildError::from)?;

    let plugin = ModuleInfoPlugin::new(paths, config.plugin_options());
    let ctx = plugin.on_graph_ready(&site.root, &modules, &chunks);
    Ok(GraphPhase { plugin, ctx })
}
