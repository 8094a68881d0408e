//! File categorization strategies.
//!
//! A [`Categorizer`] turns a flat list of documentation file names into a
//! [`CategoryMap`]. Bucket order is the order in which buckets were first
//! seen, items keep input order, and nothing is deduplicated or sorted.

use std::collections::HashMap;

/// Bucket for prefix-strategy names that matched no known prefix.
pub const UNCATEGORIZED: &str = "_uncategorized";

/// Bucket for directory-strategy files that live at the docs root.
pub const ROOT: &str = "_root";

/// Whether a bucket's items are rendered as bare index segments.
#[must_use]
pub fn is_flat_bucket(key: &str) -> bool {
    key == UNCATEGORIZED || key == ROOT
}

/// Insertion-ordered mapping from bucket key to item names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    buckets: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl CategoryMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to `bucket`, creating the bucket at the end if needed.
    pub fn push(&mut self, bucket: &str, item: impl Into<String>) {
        let index = match self.positions.get(bucket) {
            Some(&index) => index,
            None => {
                self.buckets.push((bucket.to_string(), Vec::new()));
                let index = self.buckets.len() - 1;
                self.positions.insert(bucket.to_string(), index);
                index
            }
        };
        self.buckets[index].1.push(item.into());
    }

    /// Items of a bucket, if it was populated.
    #[must_use]
    pub fn get(&self, bucket: &str) -> Option<&[String]> {
        self.positions.get(bucket).map(|&index| self.buckets[index].1.as_slice())
    }

    /// Buckets in first-population order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets.iter().map(|(key, items)| (key.as_str(), items.as_slice()))
    }

    /// Bucket keys in first-population order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(key, _)| key.as_str())
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no bucket was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// How an adapter groups its documentation files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categorizer {
    /// Group `<prefix>_<suffix>` base names under `<prefix>`.
    ///
    /// Prefixes are tried in slice order and the first match wins, so a
    /// prefix that is itself a prefix of another must come after it.
    Prefix(&'static [&'static str]),
    /// Group relative paths by their first directory.
    Directory,
}

impl Categorizer {
    /// Whether the categorizer needs full relative paths rather than base names.
    #[must_use]
    pub const fn uses_paths(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Categorize file names with this strategy.
    pub fn categorize<S: AsRef<str>>(&self, file_names: &[S]) -> CategoryMap {
        match self {
            Self::Prefix(prefixes) => categorize_by_prefix(file_names, prefixes),
            Self::Directory => categorize_by_directory(file_names),
        }
    }
}

/// Prefix strategy: `active_record_basics.md` → `active_record: basics`.
pub fn categorize_by_prefix<S: AsRef<str>>(file_names: &[S], prefixes: &[&str]) -> CategoryMap {
    let mut categories = CategoryMap::new();

    for file_name in file_names {
        let base_name = strip_markdown_extension(file_name.as_ref());

        let matched = prefixes.iter().find_map(|prefix| {
            base_name
                .strip_prefix(*prefix)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|suffix| (*prefix, suffix))
        });

        match matched {
            Some((prefix, suffix)) => categories.push(prefix, suffix),
            None => categories.push(UNCATEGORIZED, base_name),
        }
    }

    categories
}

/// Directory strategy: `handbook/01_introduction.md` → `handbook: introduction`.
pub fn categorize_by_directory<S: AsRef<str>>(file_names: &[S]) -> CategoryMap {
    let mut categories = CategoryMap::new();

    for file_name in file_names {
        let path = file_name.as_ref();
        let segments: Vec<&str> = path.split('/').collect();
        let bucket = if segments.len() > 1 {
            segments[0]
        } else {
            ROOT
        };
        let last = segments.last().copied().unwrap_or(path);
        let name = strip_ordering_prefix(strip_markdown_extension(last));
        categories.push(bucket, name);
    }

    categories
}

fn strip_markdown_extension(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}

/// Remove a leading `NN_` ordering prefix made only of digits.
fn strip_ordering_prefix(name: &str) -> &str {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && name.as_bytes().get(digits) == Some(&b'_') {
        &name[digits + 1..]
    } else {
        name
    }
}
