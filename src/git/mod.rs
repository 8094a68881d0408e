//! Git transport for sources distributed as repositories.
//!
//! Uses the system `git` binary, like the rest of the toolchain a developer
//! already has, instead of linking a git implementation.

pub mod command_builder;

pub use command_builder::GitCommand;

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::core::DocsError;
use crate::utils::fs::{ensure_dir, remove_dir_if_exists};
use crate::utils::platform::{command_exists, get_git_command};

/// Fail with [`DocsError::GitNotFound`] unless git is on `PATH`.
pub fn ensure_git_available() -> Result<()> {
    if command_exists(get_git_command()) {
        Ok(())
    } else {
        Err(DocsError::GitNotFound.into())
    }
}

/// Shallow-clone `url` into `dest`.
///
/// `dest` must not exist. A failed clone leaves nothing behind.
pub async fn clone_shallow(url: &str, dest: &Path, timeout: Duration) -> Result<()> {
    ensure_git_available()?;
    if let Some(parent) = dest.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    tracing::info!(target: "git", "Cloning {} into {}", url, dest.display());
    let result = GitCommand::clone_shallow(url, dest).with_timeout(Some(timeout)).execute().await;

    if let Err(e) = result {
        remove_dir_if_exists(dest)?;
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clone_of_missing_repository_fails_cleanly() {
        if ensure_git_available().is_err() {
            return;
        }

        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no-such-repo");
        let dest = temp.path().join("clone");

        let err = clone_shallow(&missing.display().to_string(), &dest, Duration::from_secs(30))
            .await
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<DocsError>(), Some(DocsError::GitCloneFailed { .. })));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_clone_local_repository() {
        if ensure_git_available().is_err() {
            return;
        }

        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        std::fs::create_dir_all(origin.join("directives")).unwrap();
        std::fs::write(origin.join("directives/data.md"), "# x-data\n").unwrap();

        let git = |args: &[&str]| {
            let status = std::process::Command::new("git")
                .args(args)
                .current_dir(&origin)
                .env("GIT_AUTHOR_NAME", "Docs")
                .env("GIT_AUTHOR_EMAIL", "docs@example.com")
                .env("GIT_COMMITTER_NAME", "Docs")
                .env("GIT_COMMITTER_EMAIL", "docs@example.com")
                .status()
                .unwrap();
            assert!(status.success(), "git {args:?} failed");
        };
        git(&["init", "--quiet"]);
        git(&["add", "."]);
        git(&["commit", "--quiet", "-m", "docs"]);

        let dest = temp.path().join(".alpine-docs");
        let url = format!("file://{}", origin.display());
        clone_shallow(&url, &dest, Duration::from_secs(30)).await.unwrap();

        assert!(dest.join("directives/data.md").exists());
    }
}
