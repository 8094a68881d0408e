//! User-level configuration in `~/.agentdocs/config.toml`.
//!
//! Every key is optional:
//!
//! ```toml
//! # Default target file when --output is not given
//! output = "docs/AGENTS.md"
//!
//! http_timeout_secs = 300
//! git_timeout_secs = 60
//! progress = false
//!
//! # Fetch a source from somewhere else; {version} is substituted
//! [mirrors]
//! rails = "https://mirror.internal/rails/v{version}.zip"
//! turbo = "file:///srv/archives/turbo-site-main.zip"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{GIT_CLONE_TIMEOUT, HTTP_TIMEOUT};
use crate::utils::platform::{get_home_dir, resolve_path};

const fn default_http_timeout_secs() -> u64 {
    HTTP_TIMEOUT.as_secs()
}

const fn default_git_timeout_secs() -> u64 {
    GIT_CLONE_TIMEOUT.as_secs()
}

const fn default_progress() -> bool {
    true
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default target file, may use `~` and `$VAR`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Archive download timeout
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Git clone timeout
    #[serde(default = "default_git_timeout_secs")]
    pub git_timeout_secs: u64,

    /// Show progress bars
    #[serde(default = "default_progress")]
    pub progress: bool,

    /// Source name → archive URL template
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub mirrors: HashMap<String, String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output: None,
            http_timeout_secs: default_http_timeout_secs(),
            git_timeout_secs: default_git_timeout_secs(),
            progress: default_progress(),
            mirrors: HashMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Load from `path`, falling back to defaults when it does not exist.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and parse `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// `~/.agentdocs/config.toml`, or `%LOCALAPPDATA%\agentdocs\config.toml` on Windows.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("agentdocs")
        } else {
            get_home_dir()?.join(".agentdocs")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Mirror template configured for `source`.
    #[must_use]
    pub fn mirror_for(&self, source: &str) -> Option<&str> {
        self.mirrors.get(source).map(String::as_str)
    }

    /// Configured default target file with `~` and variables expanded.
    pub fn output_path(&self) -> Result<Option<PathBuf>> {
        self.output.as_deref().map(resolve_path).transpose()
    }

    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    #[must_use]
    pub const fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }
}
