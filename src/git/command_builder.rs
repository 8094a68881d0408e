//! Builder for system `git` invocations.
//!
//! Commands run on `tokio::process` with captured output and a timeout.
//! Failures are turned into [`DocsError`] variants so the CLI can print a
//! useful suggestion instead of raw stderr.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::GIT_CLONE_TIMEOUT;
use crate::core::DocsError;
use crate::utils::platform::get_git_command;

/// A git command under construction.
pub struct GitCommand {
    args: Vec<String>,
    env_vars: Vec<(String, String)>,
    timeout_duration: Option<Duration>,
    clone_url: Option<String>,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            // Never block on a credential prompt.
            env_vars: vec![("GIT_TERMINAL_PROMPT".to_string(), "0".to_string())],
            timeout_duration: Some(GIT_CLONE_TIMEOUT),
            clone_url: None,
        }
    }
}

impl GitCommand {
    fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// `git clone --depth 1 <url> <target>`.
    pub fn clone_shallow(url: &str, target: impl AsRef<Path>) -> Self {
        let mut cmd = Self::default().args(["clone", "--depth", "1", "--quiet"]);
        cmd.args.push(url.to_string());
        cmd.args.push(target.as_ref().display().to_string());
        cmd.clone_url = Some(url.to_string());
        cmd
    }

    /// The argument list as passed to the process.
    #[must_use]
    pub fn full_args(&self) -> &[String] {
        &self.args
    }

    /// The git subcommand.
    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    /// Run to completion; a non-zero exit becomes a [`DocsError`].
    pub async fn execute(self) -> Result<()> {
        let start = std::time::Instant::now();
        let git_command = get_git_command();
        let full_args = self.full_args().to_vec();

        let mut cmd = Command::new(git_command);
        cmd.args(&full_args).stdout(Stdio::piped()).stderr(Stdio::piped()).kill_on_drop(true);
        for (key, value) in &self.env_vars {
            tracing::trace!(target: "git", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }

        tracing::debug!(target: "git", "Executing command: {} {}", git_command, full_args.join(" "));

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result.with_context(|| format!("Failed to execute git {}", full_args.join(" ")))?
            } else {
                tracing::warn!(
                    target: "git",
                    "Command timed out after {} seconds: git {}",
                    duration.as_secs(),
                    full_args.join(" ")
                );
                return Err(DocsError::GitCommandError {
                    operation: self.operation(),
                    stderr: format!(
                        "Git command timed out after {} seconds. Check your network connection \
                         or raise git_timeout_secs in the config file.",
                        duration.as_secs()
                    ),
                }
                .into());
            }
        } else {
            output_future
                .await
                .with_context(|| format!("Failed to execute git {}", full_args.join(" ")))?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(target: "git", "Command failed with exit code: {:?}", output.status.code());
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "Error: {}", stderr.trim());
            }

            let error = match self.clone_url {
                Some(url) => DocsError::GitCloneFailed {
                    url,
                    reason: stderr.trim().to_string(),
                },
                None => DocsError::GitCommandError {
                    operation: self.operation(),
                    stderr: if stderr.is_empty() { stdout } else { stderr },
                },
            };
            return Err(error.into());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "git::perf",
                "Git {} took {:.2}s",
                self.operation(),
                elapsed.as_secs_f64()
            );
        }

        Ok(())
    }
}
