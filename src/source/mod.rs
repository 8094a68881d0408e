//! Documentation sources.
//!
//! A [`SourceAdapter`] is plain data: where a framework's docs live, how to
//! filter the downloaded archive, where to cache them, how to group the files
//! and how to title the index. Every supported framework is one `static`
//! value; adding a framework means adding one more value to [`all`].
//!
//! | name       | fetched as                         | grouping  |
//! |------------|------------------------------------|-----------|
//! | `rails`    | zip of the `v{version}` tag        | prefix    |
//! | `turbo`    | zip of the site's `main` branch    | directory |
//! | `stimulus` | zip of the site's `main` branch    | directory |
//! | `alpine`   | shallow git clone                  | directory |

mod alpine;
mod rails;
mod stimulus;
mod turbo;

pub use alpine::ALPINE;
pub use rails::{RAILS, RAILS_PREFIXES};
pub use stimulus::STIMULUS;
pub use turbo::TURBO;

use std::path::{Path, PathBuf};

use crate::constants::BIN_NAME;
use crate::index::{CategoryMap, Categorizer};
use crate::version::GemDependency;

/// Placeholder replaced by the version in archive URL templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// How a source's documentation is transported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLocation {
    /// A zip archive URL template (may contain `{version}`).
    Zip(&'static str),
    /// A git repository cloned with depth 1.
    Git(&'static str),
}

/// A transport location with the version filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedArchive {
    /// Download and unpack this zip archive.
    Zip(String),
    /// Shallow-clone this repository.
    Git(String),
}

impl ResolvedArchive {
    /// The URL regardless of transport.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Zip(url) | Self::Git(url) => url,
        }
    }
}

/// Which archive entries are extracted.
///
/// Paths are matched after the archive's top-level directory is stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFilter {
    /// Every entry.
    All,
    /// Entries below the given directory prefix (e.g. `guides/source/`).
    Under(&'static str),
    /// Files at the archive root plus entries below the given prefix.
    TopLevelAnd(&'static str),
}

impl ArchiveFilter {
    /// Whether a (top-level-stripped, `/`-separated) entry path is kept.
    #[must_use]
    pub fn admits(&self, path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Under(prefix) => path.starts_with(prefix),
            Self::TopLevelAnd(prefix) => !path.contains('/') || path.starts_with(prefix),
        }
    }
}

/// Per-framework documentation source descriptor.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceAdapter {
    /// Command name and registry key (`rails`, `turbo`, ...)
    pub name: &'static str,
    /// Display name used in the header and messages
    pub title: &'static str,
    /// Derives the `<!-- {prefix}-START -->` / `-END` markers
    pub marker_prefix: &'static str,
    /// Where the documentation is fetched from
    pub archive: ArchiveLocation,
    /// Archive entries to keep when extracting
    pub archive_filter: ArchiveFilter,
    /// Docs directory relative to the extracted root (empty for the root itself)
    pub docs_subpath: &'static str,
    /// Cache directory relative to the project root
    pub cache_root: &'static str,
    /// Whether each version gets its own `{name}-{version}` cache subdirectory
    pub versioned_cache: bool,
    /// How files are grouped in the index
    pub categorizer: Categorizer,
    /// Whether the header names the version
    pub versioned_header: bool,
    /// Extra header segment telling agents to prefer these docs
    pub freshness_warning: Option<&'static str>,
    /// Lock-file dependency used to detect the version
    pub version_source: Option<GemDependency>,
    /// Skip markdown files that are empty or frontmatter only
    pub substantial_only: bool,
}

impl SourceAdapter {
    /// Transport location for `version`.
    #[must_use]
    pub fn archive_location(&self, version: &str) -> ResolvedArchive {
        match self.archive {
            ArchiveLocation::Zip(template) => {
                ResolvedArchive::Zip(template.replace(VERSION_PLACEHOLDER, version))
            }
            ArchiveLocation::Git(url) => ResolvedArchive::Git(url.replace(VERSION_PLACEHOLDER, version)),
        }
    }

    /// Transport location using a mirror template instead of the built-in one.
    #[must_use]
    pub fn archive_location_from(&self, template: &str, version: &str) -> ResolvedArchive {
        let url = template.replace(VERSION_PLACEHOLDER, version);
        match self.archive {
            ArchiveLocation::Zip(_) => ResolvedArchive::Zip(url),
            ArchiveLocation::Git(_) => ResolvedArchive::Git(url),
        }
    }

    /// Docs directory inside an extracted archive.
    #[must_use]
    pub fn docs_path(&self, extracted_root: &Path) -> PathBuf {
        if self.docs_subpath.is_empty() {
            extracted_root.to_path_buf()
        } else {
            extracted_root.join(self.docs_subpath)
        }
    }

    /// Cache directory relative to the project root.
    ///
    /// Versioned sources use `{cache_root}/{name}-{version}` when a version is
    /// given; without one the shared root is returned.
    #[must_use]
    pub fn cache_dir(&self, version: Option<&str>) -> PathBuf {
        match version {
            Some(version) if self.versioned_cache => {
                Path::new(self.cache_root).join(format!("{}-{}", self.name, version))
            }
            _ => PathBuf::from(self.cache_root),
        }
    }

    /// Line added to `.gitignore` for this source's cache.
    #[must_use]
    pub fn gitignore_entry(&self) -> String {
        format!("{}/", self.cache_root.trim_end_matches('/'))
    }

    /// Group file names with this source's strategy.
    pub fn categorize<S: AsRef<str>>(&self, file_names: &[S]) -> CategoryMap {
        self.categorizer.categorize(file_names)
    }

    /// First segment(s) of the index line.
    #[must_use]
    pub fn render_header(&self, version: &str, docs_path: &str) -> String {
        let title = if self.versioned_header {
            format!("[{} {} Docs]", self.title, version)
        } else {
            format!("[{} Docs]", self.title)
        };

        let mut segments = vec![title, format!("root:{docs_path}")];
        if let Some(warning) = self.freshness_warning {
            segments.push(warning.to_string());
        }
        segments.push(format!("Refresh: {} {}", BIN_NAME, self.name));
        segments.join("|")
    }
}

/// Every registered source, in display order.
#[must_use]
pub fn all() -> &'static [&'static SourceAdapter] {
    static SOURCES: [&SourceAdapter; 4] = [&RAILS, &TURBO, &STIMULUS, &ALPINE];
    &SOURCES
}
