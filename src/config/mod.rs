//! Configuration loading.
//!
//! The config file is located in this order:
//!
//! 1. `--config <path>` (must exist)
//! 2. `AGENTDOCS_CONFIG` environment variable
//! 3. [`GlobalConfig::default_path`]
//!
//! A missing file in cases 2 and 3 means defaults.

mod global;

pub use global::GlobalConfig;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_ENV;
use crate::core::DocsError;
use crate::utils::platform::resolve_path;

/// Where configuration is read from, without touching the filesystem.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return resolve_path(&path.to_string_lossy());
    }

    match std::env::var(CONFIG_ENV) {
        Ok(value) if !value.trim().is_empty() => resolve_path(value.trim()),
        _ => GlobalConfig::default_path(),
    }
}

/// Load configuration, honoring `--config` and `AGENTDOCS_CONFIG`.
pub async fn load_config(explicit: Option<&Path>) -> Result<GlobalConfig> {
    let path = config_path(explicit)?;

    if explicit.is_some() && !path.exists() {
        return Err(DocsError::ConfigError {
            file: path.display().to_string(),
            reason: "file does not exist".to_string(),
        }
        .into());
    }

    GlobalConfig::load_or_default(&path).await
}
