//! Framework version detection from `Gemfile.lock`.
//!
//! Only two textual patterns of the Bundler lock format matter here:
//!
//! 1. A `GIT` section whose `remote:` is the framework's canonical repository,
//!    followed by a `revision:` line and an optional `branch:` line. The gem is
//!    then installed from git and there is no released version to fetch docs
//!    for; the caller has to ask for one.
//! 2. An indented spec line `rails (7.1.3)`. The parenthesized token is taken
//!    verbatim, so `8.0.0.beta1` and `7.0.8.7` survive unchanged.
//!
//! ```text
//! GIT
//!   remote: https://github.com/rails/rails.git
//!   revision: abc123def456
//!   branch: main
//!   specs:
//!     rails (8.0.0.alpha)
//! ```

use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::GEMFILE_LOCK;
use crate::core::DocsError;

/// Outcome of reading a lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockfileVersion {
    /// The gem resolved to a released version.
    Resolved {
        /// Parenthesized version token, verbatim
        version: String,
    },
    /// The gem is installed from a git source.
    GitSourced {
        /// Branch named in the `GIT` section, `None` when it tracks the default branch
        reference: Option<String>,
    },
}

/// A gem whose version can be detected from `Gemfile.lock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemDependency {
    /// Gem name as it appears in the specs list
    pub gem: &'static str,
    /// Display name used in messages
    pub display_name: &'static str,
    /// Canonical repository URL without the `.git` suffix
    pub repository: &'static str,
}

/// The Rails gem.
pub const RAILS_GEM: GemDependency = GemDependency {
    gem: "rails",
    display_name: "Rails",
    repository: "https://github.com/rails/rails",
};

impl GemDependency {
    /// Parse lock-file text into a [`LockfileVersion`].
    ///
    /// Fails with [`DocsError::BadInput`] when neither a git source nor a
    /// versioned spec line for the gem is present.
    pub fn parse_version(&self, content: &str) -> Result<LockfileVersion> {
        let content = content.replace("\r\n", "\n");

        let git_block = Regex::new(&format!(
            r"(?m)^GIT\n\s+remote:\s+{}(?:\.git)?\n\s+revision:\s+\S+\n(?:\s+branch:\s+(\S+)\n)?",
            regex::escape(self.repository)
        ))?;

        if let Some(captures) = git_block.captures(&content) {
            let reference = captures.get(1).map(|m| m.as_str().to_string());
            debug!("{} is installed from git (ref: {:?})", self.gem, reference);
            return Ok(LockfileVersion::GitSourced {
                reference,
            });
        }

        let spec_line = Regex::new(&format!(r"(?m)^\s+{}\s+\(([^)]+)\)", regex::escape(self.gem)))?;

        match spec_line.captures(&content) {
            Some(captures) => {
                let version = captures[1].to_string();
                debug!("Detected {} {}", self.gem, version);
                Ok(LockfileVersion::Resolved {
                    version,
                })
            }
            None => Err(DocsError::bad_input(format!(
                "{} gem not found in {}",
                self.display_name, GEMFILE_LOCK
            ))
            .into()),
        }
    }
}

/// Parse a `Gemfile.lock` for the Rails gem.
pub fn parse_rails_version(content: &str) -> Result<LockfileVersion> {
    RAILS_GEM.parse_version(content)
}

/// Find `Gemfile.lock` in `start_dir` or the nearest ancestor that has one.
pub fn find_lockfile(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(GEMFILE_LOCK);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
