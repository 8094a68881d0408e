//! Platform lookups: home directory, executables, user-supplied paths.

use anyhow::Result;
use std::path::PathBuf;

/// Whether we are running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// The user's home directory.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Name of the git executable.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if is_windows() { "git.exe" } else { "git" }
}

/// Whether `cmd` resolves on `PATH`.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| anyhow::anyhow!("Failed to expand path '{path}': {e}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
