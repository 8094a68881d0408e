//! Compact documentation index.
//!
//! The index is a single `|`-delimited line optimized for token economy: a
//! header written by the source adapter, then one segment per bucket.
//!
//! ```text
//! [Rails 7.1.3 Docs]|root:.rails-docs/rails-7.1.3/guides/source|STOP. ...|Refresh: agentdocs rails|active_record:{basics,callbacks}|getting_started
//! ```
//!
//! Buckets named [`UNCATEGORIZED`] or [`ROOT`] are flattened into one bare
//! segment per item; every other bucket becomes `key:{item,item,...}`.
//! Item names containing `|` are not escaped and produce a malformed line.

pub mod categorize;

pub use categorize::{CategoryMap, Categorizer, ROOT, UNCATEGORIZED, is_flat_bucket};

use crate::source::SourceAdapter;

/// Segment delimiter of the index line.
pub const SEGMENT_SEPARATOR: &str = "|";

/// Build the index line for `files` with `adapter`'s header and categorizer.
///
/// Prefix-strategy adapters only see base file names; directory-strategy
/// adapters see the full relative paths.
pub fn build_index<S: AsRef<str>>(
    adapter: &SourceAdapter,
    files: &[S],
    version: &str,
    docs_path: &str,
) -> String {
    let names: Vec<&str> = if adapter.categorizer.uses_paths() {
        files.iter().map(|file| file.as_ref()).collect()
    } else {
        files.iter().map(|file| base_name(file.as_ref())).collect()
    };

    let categories = adapter.categorize(&names);
    render_index(&adapter.render_header(version, docs_path), &categories)
}

/// Render a header and categorized buckets into one index line.
pub fn render_index(header: &str, categories: &CategoryMap) -> String {
    let mut segments = vec![header.to_string()];

    for (key, items) in categories.iter() {
        if is_flat_bucket(key) {
            segments.extend(items.iter().cloned());
        } else {
            segments.push(format!("{key}:{{{}}}", items.join(",")));
        }
    }

    segments.join(SEGMENT_SEPARATOR)
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
