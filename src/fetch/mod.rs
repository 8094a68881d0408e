//! Materializing a source's documentation on disk.
//!
//! Zip archives are downloaded with `reqwest` and unpacked by [`archive`];
//! git sources are shallow-cloned through [`crate::git`]. A `file://` URL
//! reads a local archive instead of hitting the network, which is how
//! offline mirrors are configured.

pub mod archive;

pub use archive::{extract_zip, strip_top_level};

use anyhow::{Context, Result};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;

use crate::constants::{GIT_CLONE_TIMEOUT, HTTP_TIMEOUT, user_agent};
use crate::core::DocsError;
use crate::git;
use crate::source::{ResolvedArchive, SourceAdapter};
use crate::utils::fs::remove_dir_if_exists;
use crate::utils::progress::ProgressBar;

/// Transport settings for one fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub http_timeout: Duration,
    pub git_timeout: Duration,
    /// Remove the destination before fetching.
    pub force: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            http_timeout: HTTP_TIMEOUT,
            git_timeout: GIT_CLONE_TIMEOUT,
            force: false,
        }
    }
}

/// Fetch `adapter`'s docs from `location` into `dest`.
///
/// Returns the number of files extracted (zip) or `None` for git clones.
pub async fn fetch_docs(
    adapter: &SourceAdapter,
    location: &ResolvedArchive,
    dest: &Path,
    options: &FetchOptions,
) -> Result<Option<usize>> {
    if options.force {
        tracing::debug!(target: "fetch", "Removing {} before re-fetch", dest.display());
        remove_dir_if_exists(dest)?;
    }

    match location {
        ResolvedArchive::Zip(url) => {
            let bytes = download(adapter.name, url, options.http_timeout).await?;
            let dest = dest.to_path_buf();
            let filter = adapter.archive_filter;
            let written = tokio::task::spawn_blocking(move || extract_zip(&bytes, &dest, filter))
                .await
                .context("Archive extraction task panicked")??;
            Ok(Some(written))
        }
        ResolvedArchive::Git(url) => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Cloning {}", url));
            let result = git::clone_shallow(url, dest, options.git_timeout).await;
            spinner.finish_and_clear();
            result.map(|()| None)
        }
    }
}

/// Download `url` into memory.
///
/// 404 becomes `"{source} docs not found at {url}"`; any other non-success
/// status or transport error becomes [`DocsError::FetchFailed`].
pub async fn download(source: &str, url: &str, timeout: Duration) -> Result<Vec<u8>> {
    if let Some(path) = url.strip_prefix("file://") {
        tracing::debug!(target: "fetch", "Reading local archive {}", path);
        return tokio::fs::read(path).await.map_err(|e| {
            let status = (e.kind() == std::io::ErrorKind::NotFound).then_some(404);
            let reason = if status.is_some() {
                format!("{source} docs not found at {url}")
            } else {
                format!("Failed to read {url}: {e}")
            };
            anyhow::Error::from(DocsError::FetchFailed {
                url: url.to_string(),
                status,
                reason,
            })
        });
    }

    tracing::info!(target: "fetch", "Downloading {}", url);
    let client = reqwest::Client::builder()
        .user_agent(user_agent())
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client.get(url).send().await.map_err(|e| transport_error(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        let reason = if status == reqwest::StatusCode::NOT_FOUND {
            format!("{source} docs not found at {url}")
        } else {
            format!(
                "Failed to fetch {url}: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()
        };
        return Err(DocsError::FetchFailed {
            url: url.to_string(),
            status: Some(status.as_u16()),
            reason,
        }
        .into());
    }

    let progress = ProgressBar::new_download(response.content_length());
    progress.set_prefix(source.to_string());
    progress.set_message(format!("Downloading {source} docs"));

    let mut body = Vec::with_capacity(initial_capacity(response.content_length()));
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                progress.finish_and_clear();
                return Err(transport_error(url, &e).into());
            }
        };
        progress.inc(chunk.len() as u64);
        body.extend_from_slice(&chunk);
    }
    progress.finish_and_clear();

    tracing::debug!(target: "fetch", "Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

/// Upper bound on the buffer reserved up front from `Content-Length`.
const MAX_PREALLOCATION: u64 = 64 << 20;

/// Buffer size to reserve for a body; the header is not trusted beyond [`MAX_PREALLOCATION`].
fn initial_capacity(content_length: Option<u64>) -> usize {
    usize::try_from(content_length.unwrap_or(0).min(MAX_PREALLOCATION)).unwrap_or(0)
}

fn transport_error(url: &str, error: &reqwest::Error) -> DocsError {
    let reason = if error.is_timeout() {
        format!("Timed out fetching {url}")
    } else {
        format!("Failed to fetch {url}: {error}")
    };
    DocsError::FetchFailed {
        url: url.to_string(),
        status: error.status().map(|status| status.as_u16()),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RAILS, TURBO};
    use crate::test_utils::ZipFixture;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_local_zip_archive() {
        let temp = TempDir::new().unwrap();
        let archive_path = temp.path().join("turbo.zip");
        ZipFixture::new("turbo-site-main")
            .file("_source/reference/frames.md", "# Frames")
            .file("package.json", "{}")
            .write_to(&archive_path);

        let dest = temp.path().join("project/.turbo-docs");
        let location = ResolvedArchive::Zip(format!("file://{}", archive_path.display()));
        let written = fetch_docs(&TURBO, &location, &dest, &FetchOptions::default()).await.unwrap();

        assert_eq!(written, Some(2));
        assert!(dest.join("_source/reference/frames.md").exists());
    }

    #[test]
    fn test_initial_capacity_ignores_oversized_content_length() {
        assert_eq!(initial_capacity(None), 0);
        assert_eq!(initial_capacity(Some(1024)), 1024);
        assert_eq!(initial_capacity(Some(u64::MAX)), 64 << 20);
    }

    #[tokio::test]
    async fn test_missing_local_archive_is_not_found() {
        let temp = TempDir::new().unwrap();
        let url = format!("file://{}", temp.path().join("missing.zip").display());

        let err = download("rails", &url, HTTP_TIMEOUT).await.unwrap_err();
        let docs_error = err.downcast_ref::<DocsError>().unwrap();
        assert_eq!(docs_error.status_code(), Some(404));
        assert_eq!(err.to_string(), format!("rails docs not found at {url}"));
    }

    #[tokio::test]
    async fn test_force_removes_previous_cache() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join(".rails-docs/rails-7.1.3");
        std::fs::create_dir_all(dest.join("guides/source")).unwrap();
        std::fs::write(dest.join("guides/source/old.md"), "old").unwrap();

        let archive_path = temp.path().join("rails.zip");
        ZipFixture::new("rails-7.1.3")
            .file("guides/source/getting_started.md", "# GS")
            .write_to(&archive_path);

        let options = FetchOptions {
            force: true,
            ..FetchOptions::default()
        };
        let location = ResolvedArchive::Zip(format!("file://{}", archive_path.display()));
        fetch_docs(&RAILS, &location, &dest, &options).await.unwrap();

        assert!(!dest.join("guides/source/old.md").exists());
        assert!(dest.join("guides/source/getting_started.md").exists());
    }
}
