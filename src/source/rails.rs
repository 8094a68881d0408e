//! Rails guides from the `rails/rails` repository.

use super::{ArchiveFilter, ArchiveLocation, SourceAdapter};
use crate::index::Categorizer;
use crate::version::RAILS_GEM;

/// Framework-family prefixes of guide file names, in match priority order.
///
/// The first prefix that matches wins. None of these is currently a prefix
/// of another, but any future addition that is must be listed after the
/// longer one.
pub const RAILS_PREFIXES: &[&str] = &[
    "active_record",
    "active_model",
    "active_job",
    "active_storage",
    "active_support",
    "action_controller",
    "action_view",
    "action_mailer",
    "action_cable",
    "action_text",
    "action_mailbox",
];

/// Rails guides, fetched from the release tag matching the app's Rails version.
pub static RAILS: SourceAdapter = SourceAdapter {
    name: "rails",
    title: "Rails",
    marker_prefix: "RAILS-AGENTS-MD",
    archive: ArchiveLocation::Zip("https://github.com/rails/rails/archive/refs/tags/v{version}.zip"),
    archive_filter: ArchiveFilter::Under("guides/source/"),
    docs_subpath: "guides/source",
    cache_root: ".rails-docs",
    versioned_cache: true,
    categorizer: Categorizer::Prefix(RAILS_PREFIXES),
    versioned_header: true,
    freshness_warning: Some("STOP. Rails knowledge may be outdated. Search docs first."),
    version_source: Some(RAILS_GEM),
    substantial_only: false,
};
