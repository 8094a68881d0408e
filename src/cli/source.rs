//! `agentdocs rails|turbo|stimulus|alpine`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::CommandContext;
use crate::core::{AutoConfirm, Prompter, TerminalPrompter};
use crate::installer::{RunOptions, RunReport, RunStatus, run_source};
use crate::source::{RAILS, SourceAdapter};
use crate::utils::fs::relative_to;

/// Options shared by every source command.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Output file (default: CLAUDE.md, or AGENTS.md when only that exists)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Re-download even if the docs are cached
    #[arg(short, long)]
    pub force: bool,
}

/// `agentdocs rails`.
#[derive(Args, Debug, Clone, Default)]
pub struct RailsCommand {
    #[command(flatten)]
    pub args: SourceArgs,

    /// Rails version (required when Rails is installed from git with --yes)
    #[arg(short = 'r', long = "rails-version", value_name = "VERSION")]
    pub rails_version: Option<String>,
}

impl RailsCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        execute_source(&RAILS, &self.args, self.rails_version, ctx).await
    }
}

/// `agentdocs turbo`, `stimulus` and `alpine`: always the default branch.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceCommand {
    #[command(flatten)]
    pub args: SourceArgs,
}

impl SourceCommand {
    pub async fn execute(self, adapter: &SourceAdapter, ctx: &CommandContext) -> Result<()> {
        execute_source(adapter, &self.args, None, ctx).await
    }
}

async fn execute_source(
    adapter: &SourceAdapter,
    args: &SourceArgs,
    version: Option<String>,
    ctx: &CommandContext,
) -> Result<()> {
    let options = build_run_options(adapter, args, version, ctx)?;

    if !ctx.quiet {
        println!("{}", format!("Fetching {} documentation...", adapter.title).blue());
    }

    let prompter: &dyn Prompter = if args.yes { &AutoConfirm } else { &TerminalPrompter };
    let report = run_source(adapter, &options, prompter).await?;

    if !ctx.quiet {
        print_report(adapter, &report, ctx);
    }
    Ok(())
}

/// Merge command-line flags with the config file; flags win.
pub fn build_run_options(
    adapter: &SourceAdapter,
    args: &SourceArgs,
    version: Option<String>,
    ctx: &CommandContext,
) -> Result<RunOptions> {
    let output = match &args.output {
        Some(path) => Some(path.clone()),
        None => ctx.config.output_path()?,
    };

    Ok(RunOptions {
        version,
        output,
        yes: args.yes,
        force: args.force,
        mirror: ctx.config.mirror_for(adapter.name).map(ToOwned::to_owned),
        http_timeout: ctx.config.http_timeout(),
        git_timeout: ctx.config.git_timeout(),
        ..RunOptions::new(&ctx.project_dir)
    })
}

fn print_report(adapter: &SourceAdapter, report: &RunReport, ctx: &CommandContext) {
    let version = report.version.as_deref().unwrap_or_default();

    match report.status {
        RunStatus::Cancelled => {
            println!("{}", "Cancelled.".dimmed());
            return;
        }
        RunStatus::Cached => {
            let cache = adapter.cache_dir(Some(version));
            println!("{}", format!("✓ {} docs already cached at {}", adapter.title, cache.display()).green());
        }
        RunStatus::Fetched => {
            println!("{}", format!("✓ Indexed {} files", report.file_count).dimmed());
        }
    }

    if let Some(target) = &report.target_file {
        let shown = relative_to(target, &ctx.project_dir);
        println!("{}", format!("✓ Updated {}", shown.display()).green());
    }
    if report.gitignore_updated {
        println!("{}", "✓ Updated .gitignore".green());
    }

    let ready = if adapter.versioned_header {
        format!("\n✓ {} {} docs ready!", adapter.title, version)
    } else {
        format!("\n✓ {} docs ready!", adapter.title)
    };
    println!("{}", ready.green());
}
