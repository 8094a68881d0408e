//! Stimulus handbook and reference from the `hotwired/stimulus-site` repository.

use super::{ArchiveFilter, ArchiveLocation, SourceAdapter};
use crate::index::Categorizer;

pub static STIMULUS: SourceAdapter = SourceAdapter {
    name: "stimulus",
    title: "Stimulus",
    marker_prefix: "STIMULUS-AGENTS-MD",
    archive: ArchiveLocation::Zip("https://github.com/hotwired/stimulus-site/archive/refs/heads/main.zip"),
    archive_filter: ArchiveFilter::All,
    docs_subpath: "_source",
    cache_root: ".stimulus-docs",
    versioned_cache: false,
    categorizer: Categorizer::Directory,
    versioned_header: false,
    freshness_warning: None,
    version_source: None,
    substantial_only: false,
};
