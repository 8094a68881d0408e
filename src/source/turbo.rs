//! Turbo handbook and reference from the `hotwired/turbo-site` repository.

use super::{ArchiveFilter, ArchiveLocation, SourceAdapter};
use crate::index::Categorizer;

/// Turbo docs. The site repository carries its build tooling and assets
/// next to the docs, so only root files and `_source/` are extracted.
pub static TURBO: SourceAdapter = SourceAdapter {
    name: "turbo",
    title: "Turbo",
    marker_prefix: "TURBO-AGENTS-MD",
    archive: ArchiveLocation::Zip("https://github.com/hotwired/turbo-site/archive/refs/heads/main.zip"),
    archive_filter: ArchiveFilter::TopLevelAnd("_source/"),
    docs_subpath: "_source",
    cache_root: ".turbo-docs",
    versioned_cache: false,
    categorizer: Categorizer::Directory,
    versioned_header: false,
    freshness_warning: None,
    version_source: None,
    substantial_only: false,
};
