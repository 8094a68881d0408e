//! Command-line interface.
//!
//! ```text
//! agentdocs rails [-o FILE] [-r VERSION] [-y] [-f]
//! agentdocs turbo|stimulus|alpine [-o FILE] [-y] [-f]
//! agentdocs list [--json]
//! ```
//!
//! Global flags (`--verbose`, `--quiet`, `--config`, `--no-progress`,
//! `-C DIR`) are accepted before or after the subcommand.

mod list;
mod source;

pub use list::{ListCommand, SourceInfo};
pub use source::{RailsCommand, SourceArgs, SourceCommand, build_run_options};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{GlobalConfig, load_config};
use crate::source::{ALPINE, STIMULUS, TURBO};
use crate::utils::progress;

/// State shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Directory the docs are installed into
    pub project_dir: PathBuf,
    pub config: GlobalConfig,
    /// Suppress status lines
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "agentdocs",
    about = "Index framework documentation for AI coding agents",
    version,
    long_about = "Downloads framework documentation (Rails guides, Turbo, Stimulus, Alpine.js) \
                  into the project and writes a compact index of it into CLAUDE.md or AGENTS.md."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file (default: ~/.agentdocs/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long, global = true)]
    no_progress: bool,

    /// Project directory (default: current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rails guides for the version in Gemfile.lock
    Rails(RailsCommand),
    /// Turbo handbook and reference
    Turbo(SourceCommand),
    /// Stimulus handbook and reference
    Stimulus(SourceCommand),
    /// Alpine.js documentation
    Alpine(SourceCommand),
    /// List the available documentation sources
    List(ListCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        init_logging(self.log_level());

        let config = load_config(self.config.as_deref()).await?;
        progress::set_enabled(!self.no_progress && config.progress);

        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        tracing::debug!("Project directory: {}", project_dir.display());

        let ctx = CommandContext {
            project_dir,
            config,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Rails(cmd) => cmd.execute(&ctx).await,
            Commands::Turbo(cmd) => cmd.execute(&TURBO, &ctx).await,
            Commands::Stimulus(cmd) => cmd.execute(&STIMULUS, &ctx).await,
            Commands::Alpine(cmd) => cmd.execute(&ALPINE, &ctx).await,
            Commands::List(cmd) => cmd.execute(&ctx),
        }
    }

    /// Default log filter for the verbosity flags.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Send `tracing` output to stderr. `RUST_LOG` overrides `default_level`.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
