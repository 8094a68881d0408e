//! Alpine.js documentation, cloned from the `alpinejs/alpine` repository.

use super::{ArchiveFilter, ArchiveLocation, SourceAdapter};
use crate::index::Categorizer;

/// Alpine.js docs. The repository is cloned rather than downloaded, and
/// stub pages that only carry frontmatter are left out of the index.
pub static ALPINE: SourceAdapter = SourceAdapter {
    name: "alpine",
    title: "Alpine.js",
    marker_prefix: "ALPINE-AGENTS-MD",
    archive: ArchiveLocation::Git("https://github.com/alpinejs/alpine.git"),
    archive_filter: ArchiveFilter::All,
    docs_subpath: "",
    cache_root: ".alpine-docs",
    versioned_cache: false,
    categorizer: Categorizer::Directory,
    versioned_header: false,
    freshness_warning: None,
    version_source: None,
    substantial_only: true,
};
