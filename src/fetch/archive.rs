//! Zip extraction for GitHub source archives.
//!
//! GitHub wraps every archive in a single `<repo>-<ref>/` directory. That
//! component is stripped, the source's [`ArchiveFilter`] picks the entries to
//! keep, and everything is unpacked into a staging directory beside the
//! destination. The staging directory is renamed into place only once every
//! entry has been written, so a broken archive never leaves a half-filled cache.

use anyhow::{Context, Result};
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::core::DocsError;
use crate::source::ArchiveFilter;
use crate::utils::fs::{ensure_dir, remove_dir_if_exists, safe_join};

/// Drop the first path component (`rails-7.1.3/guides/x.md` → `guides/x.md`).
///
/// Returns `None` for the wrapper directory itself.
#[must_use]
pub fn strip_top_level(path: &str) -> Option<&str> {
    let (_, rest) = path.split_once('/')?;
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() { None } else { Some(rest) }
}

/// Unpack `bytes` into `dest`, keeping entries admitted by `filter`.
///
/// `dest` is replaced if it already exists. Returns the number of files written.
pub fn extract_zip(bytes: &[u8], dest: &Path, filter: ArchiveFilter) -> Result<usize> {
    let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocsError::ArchiveError {
        reason: e.to_string(),
    })?;

    let parent = dest
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ensure_dir(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(".agentdocs-staging-")
        .tempdir_in(parent)
        .with_context(|| format!("Failed to create staging directory in {}", parent.display()))?;
    let staged_root = staging.path().join("docs");
    ensure_dir(&staged_root)?;

    let written = extract_entries(archive, &staged_root, filter)?;

    remove_dir_if_exists(dest)?;
    fs::rename(&staged_root, dest).with_context(|| {
        format!("Failed to move extracted docs into {}", dest.display())
    })?;

    tracing::debug!(target: "fetch", "Extracted {} files into {}", written, dest.display());
    Ok(written)
}

fn extract_entries<R: Read + Seek>(
    mut archive: ZipArchive<R>,
    root: &Path,
    filter: ArchiveFilter,
) -> Result<usize> {
    let mut written = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| DocsError::ArchiveError {
            reason: format!("entry {i}: {e}"),
        })?;

        let Some(enclosed) = entry.enclosed_name() else {
            tracing::warn!(target: "fetch", "Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let name = enclosed.to_string_lossy().replace('\\', "/");

        let Some(relative) = strip_top_level(&name) else {
            continue;
        };
        if entry.is_dir() || !filter.admits(relative) {
            continue;
        }

        let Some(out_path) = safe_join(root, relative) else {
            tracing::warn!(target: "fetch", "Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        if let Some(parent) = out_path.parent() {
            ensure_dir(parent)?;
        }

        let mut out = fs::File::create(&out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        std::io::copy(&mut entry, &mut out)
            .with_context(|| format!("Failed to extract {}", out_path.display()))?;
        written += 1;
    }

    Ok(written)
}
