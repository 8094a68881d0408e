//! Markdown files: finding docs in an extracted archive and writing the index
//! into agent instruction files.
//!
//! - [`collect_markdown_files`] walks a docs directory and returns the `.md`
//!   files relative to it, `/`-separated and sorted.
//! - [`is_substantial_markdown`] tells stub pages (empty or frontmatter only)
//!   apart from real content.
//! - [`markers`] owns the marker-delimited block in `CLAUDE.md` / `AGENTS.md`.

pub mod markers;

pub use markers::{MarkerPair, find_target_file, inject_index};

use anyhow::{Context, Result};
use gray_matter::{Matter, Pod, engine::Engine};
use std::path::Path;
use walkdir::WalkDir;

use crate::constants::SKIPPED_DOC_DIRS;
use crate::utils::fs::to_forward_slashes;

/// Engine that hands the frontmatter back untouched; only the split matters here.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// Whether a markdown document has content beyond optional frontmatter.
///
/// Frontmatter detection follows `gray_matter`: an opening `---` line may
/// carry trailing whitespace and CRLF line endings are accepted.
#[must_use]
pub fn is_substantial_markdown(content: &str) -> bool {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return false;
    }

    match Matter::<RawFrontmatter>::new().parse::<String>(&format!("{trimmed}\n")) {
        Ok(parsed) => !parsed.content.trim().is_empty(),
        Err(_) => true,
    }
}

/// Markdown files below `root`, as sorted `/`-separated relative paths.
///
/// Directories named in [`SKIPPED_DOC_DIRS`] are not entered. A missing root
/// yields an empty list. With `substantial_only`, files that are empty or
/// carry only frontmatter are dropped.
pub fn collect_markdown_files(root: &Path, substantial_only: bool) -> Result<Vec<String>> {
    if !root.is_dir() {
        tracing::debug!("Docs directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|entry| {
        !(entry.depth() > 0
            && entry.file_type().is_dir()
            && SKIPPED_DOC_DIRS.iter().any(|skipped| entry.file_name() == *skipped))
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to walk docs directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        if substantial_only {
            let content = std::fs::read_to_string(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            if !is_substantial_markdown(&content) {
                tracing::trace!("Skipping stub page {}", entry.path().display());
                continue;
            }
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(to_forward_slashes(relative));
    }

    files.sort();
    Ok(files)
}
