//! Marker-delimited index blocks inside agent instruction files.
//!
//! Each source owns one block:
//!
//! ```text
//! <!-- RAILS-AGENTS-MD-START -->
//! [Rails 7.1.3 Docs]|root:...|...
//! <!-- RAILS-AGENTS-MD-END -->
//! ```
//!
//! Injection replaces the first block for the prefix (matching up to the
//! nearest end marker) or appends a new one. Everything outside that span,
//! including other sources' blocks, is preserved byte for byte.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

use crate::constants::{AGENTS_MD, CLAUDE_MD};
use crate::utils::fs::{read_to_string_or_empty, safe_write};

/// Start and end delimiters derived from a marker prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            start: format!("<!-- {prefix}-START -->"),
            end: format!("<!-- {prefix}-END -->"),
        }
    }

    /// The full block wrapping `index`.
    #[must_use]
    pub fn wrap(&self, index: &str) -> String {
        format!("{}\n{}\n{}", self.start, index, self.end)
    }

    /// Non-greedy matcher for an existing block.
    fn pattern(&self) -> Result<Regex> {
        let pattern = format!("(?s){}.*?{}", regex::escape(&self.start), regex::escape(&self.end));
        Regex::new(&pattern).with_context(|| format!("Invalid marker pattern: {pattern}"))
    }

    /// Replace the first block in `content`, or append one.
    pub fn apply(&self, content: &str, index: &str) -> Result<String> {
        let block = self.wrap(index);
        let pattern = self.pattern()?;

        if pattern.is_match(content) {
            Ok(pattern.replacen(content, 1, NoExpand(&block)).into_owned())
        } else {
            Ok(format!("{}\n\n{}\n", content.trim_end(), block))
        }
    }

    /// Contents of the first block in `content`, if any.
    #[must_use]
    pub fn extract<'a>(&self, content: &'a str) -> Option<&'a str> {
        let begin = content.find(&self.start)? + self.start.len();
        let length = content[begin..].find(&self.end)?;
        Some(content[begin..begin + length].trim_matches('\n'))
    }
}

/// Write `index` into `target` inside the block for `marker_prefix`.
///
/// A missing target is created (with parent directories) holding only the block.
pub fn inject_index(target: &Path, index: &str, marker_prefix: &str) -> Result<()> {
    let markers = MarkerPair::new(marker_prefix);

    if !target.exists() {
        tracing::debug!("Creating {} with {} block", target.display(), marker_prefix);
        return safe_write(target, &format!("{}\n", markers.wrap(index)));
    }

    if target.is_dir() {
        return Err(anyhow::anyhow!("Target is a directory, not a file: {}", target.display()));
    }

    let content = read_to_string_or_empty(target)?;
    let updated = markers.apply(&content, index)?;
    if updated == content {
        tracing::debug!("{} block in {} is already current", marker_prefix, target.display());
        return Ok(());
    }

    safe_write(target, &updated)
        .with_context(|| format!("Failed to update {}", target.display()))
}

/// The instruction file to update in `dir`.
///
/// `CLAUDE.md` when present, else an existing `AGENTS.md`, else a new `CLAUDE.md`.
#[must_use]
pub fn find_target_file(dir: &Path) -> PathBuf {
    let claude_md = dir.join(CLAUDE_MD);
    if claude_md.exists() {
        return claude_md;
    }

    let agents_md = dir.join(AGENTS_MD);
    if agents_md.exists() {
        return agents_md;
    }

    claude_md
}
