//! Fixture archives and lock files.

use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for a zip laid out like a GitHub source archive: every entry
/// lives under one `<root>/` directory.
///
/// ```rust,no_run
/// use agentdocs::test_utils::ZipFixture;
///
/// let bytes = ZipFixture::new("rails-7.1.3")
///     .file("guides/source/active_record_basics.md", "# Basics")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ZipFixture {
    root: String,
    files: Vec<(String, String)>,
}

impl ZipFixture {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    /// Add a file at `path` below the root directory.
    #[must_use]
    pub fn file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Serialize the archive.
    ///
    /// # Panics
    ///
    /// When the zip writer fails, which only happens on allocation failure.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.add_directory(format!("{}/", self.root), options).expect("add root directory");
        for (path, content) in &self.files {
            writer.start_file(format!("{}/{}", self.root, path), options).expect("start zip entry");
            writer.write_all(content.as_bytes()).expect("write zip entry");
        }

        writer.finish().expect("finish zip").into_inner()
    }

    /// Write the archive to `path`.
    ///
    /// # Panics
    ///
    /// When the file cannot be written.
    pub fn write_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(path, self.build()).expect("write fixture archive");
    }
}

/// A `Gemfile.lock` resolving Rails to `version`.
#[must_use]
pub fn gemfile_lock_resolved(version: &str) -> String {
    format!(
        "GEM
  remote: https://rubygems.org/
  specs:
    actionpack ({version})
    rack (3.0.9)
    rails ({version})
      actionpack (= {version})
    railties ({version})

PLATFORMS
  ruby

DEPENDENCIES
  rails (~> {version})

BUNDLED WITH
   2.5.6
"
    )
}

/// A `Gemfile.lock` installing Rails from git, optionally on `branch`.
#[must_use]
pub fn gemfile_lock_git(branch: Option<&str>) -> String {
    let branch_line = branch.map(|b| format!("  branch: {b}\n")).unwrap_or_default();
    format!(
        "GIT
  remote: https://github.com/rails/rails.git
  revision: 4c1f8c1e2d7b6a5f3e9d8c7b6a5f4e3d2c1b0a99
{branch_line}  specs:
    rails (8.1.0.alpha)

GEM
  remote: https://rubygems.org/
  specs:
    rack (3.0.9)

DEPENDENCIES
  rails!
"
    )
}
