//! Installing a source's documentation index into a project.
//!
//! [`run_source`] is the whole pipeline for one source, strictly in order:
//!
//! 1. resolve the version (explicit, from `Gemfile.lock`, or `main`)
//! 2. confirm the download unless the cache already exists or `yes` is set
//! 3. fetch into the cache directory (skipped when cached and not forced)
//! 4. collect the markdown files and build the index line
//! 5. inject the index into `CLAUDE.md` / `AGENTS.md` / `--output`
//! 6. add the cache directory to `.gitignore`
//!
//! Everything before step 5 happens in memory or inside the cache directory,
//! so a failed fetch or a declined prompt never touches the target file.

pub mod gitignore;

pub use gitignore::update_gitignore;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_REF, GEMFILE_LOCK, GIT_CLONE_TIMEOUT, HTTP_TIMEOUT};
use crate::core::{DocsError, Prompter};
use crate::fetch::{FetchOptions, fetch_docs};
use crate::index::build_index;
use crate::markdown::{collect_markdown_files, find_target_file, inject_index};
use crate::source::SourceAdapter;
use crate::utils::fs::{relative_to, to_forward_slashes};
use crate::version::{LockfileVersion, find_lockfile};

/// Inputs for one [`run_source`] call.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Project root; the cache, `.gitignore` and default target live here
    pub project_dir: PathBuf,
    /// Explicit version, skipping detection
    pub version: Option<String>,
    /// Target file, relative to `project_dir` unless absolute
    pub output: Option<PathBuf>,
    /// Never prompt
    pub yes: bool,
    /// Re-fetch even when the cache exists
    pub force: bool,
    /// Archive URL template replacing the adapter's own
    pub mirror: Option<String>,
    pub http_timeout: Duration,
    pub git_timeout: Duration,
}

impl RunOptions {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            version: None,
            output: None,
            yes: false,
            force: false,
            mirror: None,
            http_timeout: HTTP_TIMEOUT,
            git_timeout: GIT_CLONE_TIMEOUT,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Docs were downloaded and the index written.
    Fetched,
    /// Docs were already cached; the index was rebuilt from them.
    Cached,
    /// The user declined; nothing was written.
    Cancelled,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub source: &'static str,
    pub status: RunStatus,
    pub version: Option<String>,
    /// File the index was injected into
    pub target_file: Option<PathBuf>,
    /// Docs root as written into the index (relative, `/`-separated)
    pub docs_path: Option<String>,
    /// Number of markdown files indexed
    pub file_count: usize,
    pub gitignore_updated: bool,
}

impl RunReport {
    fn cancelled(adapter: &SourceAdapter, version: Option<String>) -> Self {
        Self {
            source: adapter.name,
            status: RunStatus::Cancelled,
            version,
            target_file: None,
            docs_path: None,
            file_count: 0,
            gitignore_updated: false,
        }
    }
}

/// Fetch, index and inject one source's docs.
pub async fn run_source(
    adapter: &SourceAdapter,
    options: &RunOptions,
    prompter: &dyn Prompter,
) -> Result<RunReport> {
    let project_dir = options.project_dir.as_path();

    let Some(version) = resolve_version(adapter, options, prompter).await? else {
        return Ok(RunReport::cancelled(adapter, None));
    };
    tracing::info!("Using {} {}", adapter.title, version);

    let cache_dir = project_dir.join(adapter.cache_dir(Some(&version)));
    let exists = cache_dir.exists();
    let cached = exists && !options.force;

    if !exists && !options.yes {
        let question = if adapter.versioned_header {
            format!("Download {} {} docs?", adapter.title, version)
        } else {
            format!("Download {} docs?", adapter.title)
        };
        if !prompter.confirm(&question).await? {
            return Ok(RunReport::cancelled(adapter, Some(version)));
        }
    }

    if cached {
        tracing::info!("{} docs already cached at {}", adapter.title, cache_dir.display());
    } else {
        let location = match options.mirror.as_deref() {
            Some(template) => adapter.archive_location_from(template, &version),
            None => adapter.archive_location(&version),
        };
        let fetch_options = FetchOptions {
            http_timeout: options.http_timeout,
            git_timeout: options.git_timeout,
            force: options.force,
        };
        fetch_docs(adapter, &location, &cache_dir, &fetch_options).await?;
    }

    let docs_root = adapter.docs_path(&cache_dir);
    let files = collect_markdown_files(&docs_root, adapter.substantial_only)?;
    if files.is_empty() {
        tracing::warn!("No markdown files found in {}", docs_root.display());
    }

    let docs_path = to_forward_slashes(&relative_to(&docs_root, project_dir));
    let index = build_index(adapter, &files, &version, &docs_path);

    let target_file = resolve_target(project_dir, options.output.as_deref());
    inject_index(&target_file, &index, adapter.marker_prefix)
        .with_context(|| format!("Failed to write index into {}", target_file.display()))?;

    let gitignore_updated = update_gitignore(project_dir, &adapter.gitignore_entry())?;

    Ok(RunReport {
        source: adapter.name,
        status: if cached { RunStatus::Cached } else { RunStatus::Fetched },
        version: Some(version),
        target_file: Some(target_file),
        docs_path: Some(docs_path),
        file_count: files.len(),
        gitignore_updated,
    })
}

/// The version to fetch, or `None` when the user gave up at the prompt.
async fn resolve_version(
    adapter: &SourceAdapter,
    options: &RunOptions,
    prompter: &dyn Prompter,
) -> Result<Option<String>> {
    if let Some(version) = options.version.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(Some(version.to_string()));
    }

    let Some(gem) = adapter.version_source else {
        return Ok(Some(DEFAULT_REF.to_string()));
    };

    let lockfile = find_lockfile(&options.project_dir).ok_or_else(|| {
        DocsError::bad_input(format!(
            "{GEMFILE_LOCK} not found. Use --{}-version or run from a {} project.",
            adapter.name, gem.display_name
        ))
    })?;
    tracing::debug!("Reading {}", lockfile.display());

    let content = std::fs::read_to_string(&lockfile)
        .with_context(|| format!("Failed to read {}", lockfile.display()))?;

    match gem.parse_version(&content)? {
        LockfileVersion::Resolved {
            version,
        } => Ok(Some(version)),
        LockfileVersion::GitSourced {
            reference,
        } => {
            let from = reference.map_or_else(|| "git source".to_string(), |r| format!("git source ({r})"));
            if options.yes {
                return Err(DocsError::bad_input(format!(
                    "{} installed from {from}. Use --{}-version to specify which {} version docs to fetch.",
                    gem.display_name, adapter.name, gem.display_name
                ))
                .into());
            }
            prompter.version(&format!(
                "{} installed from {from}. Enter {} version (e.g., 7.1.3):",
                gem.display_name, gem.display_name
            ))
            .await
        }
    }
}

fn resolve_target(project_dir: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => project_dir.join(path),
        None => find_target_file(project_dir),
    }
}
