//! Global constants used throughout the agentdocs codebase.
//!
//! Timeouts, file names and marker formats that more than one module needs.
//! Keeping them here makes the magic strings discoverable.

use std::time::Duration;

/// Default timeout for archive downloads (120 seconds).
///
/// Rails release archives are large; slow links need the headroom.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout for shallow git clones (120 seconds).
pub const GIT_CLONE_TIMEOUT: Duration = Duration::from_secs(120);

/// Preferred target file for the documentation index.
pub const CLAUDE_MD: &str = "CLAUDE.md";

/// Fallback target file used when only `AGENTS.md` exists.
pub const AGENTS_MD: &str = "AGENTS.md";

/// Lock file used to detect the Rails version.
pub const GEMFILE_LOCK: &str = "Gemfile.lock";

/// Name of the ignore file updated after each run.
pub const GITIGNORE: &str = ".gitignore";

/// Reference used when a source has no explicit version (tracks the default branch).
pub const DEFAULT_REF: &str = "main";

/// Directory names skipped while collecting markdown files.
pub const SKIPPED_DOC_DIRS: &[&str] = &["epub"];

/// Environment variable that overrides the global config location.
pub const CONFIG_ENV: &str = "AGENTDOCS_CONFIG";

/// Environment variable that disables progress bars.
pub const NO_PROGRESS_ENV: &str = "AGENTDOCS_NO_PROGRESS";

/// Command name shown in refresh hints.
pub const BIN_NAME: &str = "agentdocs";

/// User agent sent with archive downloads.
pub fn user_agent() -> String {
    format!("{}/{}", BIN_NAME, env!("CARGO_PKG_VERSION"))
}
