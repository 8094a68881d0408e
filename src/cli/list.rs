//! `agentdocs list`: show the registered documentation sources.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::CommandContext;
use crate::source::{self, ArchiveLocation, SourceAdapter};

#[derive(Args, Debug, Clone, Default)]
pub struct ListCommand {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub marker_prefix: &'static str,
    pub cache_dir: String,
    pub transport: &'static str,
    /// Archive URL template, or the configured mirror
    pub archive: String,
    pub mirrored: bool,
}

impl SourceInfo {
    fn new(adapter: &'static SourceAdapter, mirror: Option<&str>) -> Self {
        let (transport, builtin) = match adapter.archive {
            ArchiveLocation::Zip(url) => ("zip", url),
            ArchiveLocation::Git(url) => ("git", url),
        };
        let cache_dir = if adapter.versioned_cache {
            format!("{}/{}-{{version}}", adapter.cache_root, adapter.name)
        } else {
            adapter.cache_root.to_string()
        };

        Self {
            name: adapter.name,
            title: adapter.title,
            marker_prefix: adapter.marker_prefix,
            cache_dir,
            transport,
            archive: mirror.unwrap_or(builtin).to_string(),
            mirrored: mirror.is_some(),
        }
    }
}

impl ListCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let rows = collect(ctx);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        println!("{}", "Documentation sources".bold());
        println!();
        for row in &rows {
            println!("{} {}", row.name.cyan().bold(), format!("({})", row.title).dimmed());
            println!("  markers: <!-- {}-START/END -->", row.marker_prefix);
            println!("  cache:   {}", row.cache_dir);
            let mirrored = if row.mirrored { " (mirror)".yellow().to_string() } else { String::new() };
            println!("  fetch:   {} {}{}", row.transport, row.archive, mirrored);
        }
        println!();
        println!("{}: {} sources", "Total".green().bold(), rows.len());
        Ok(())
    }
}

/// Listing rows with the config's mirrors applied.
pub fn collect(ctx: &CommandContext) -> Vec<SourceInfo> {
    source::all()
        .iter()
        .map(|adapter| SourceInfo::new(adapter, ctx.config.mirror_for(adapter.name)))
        .collect()
}
