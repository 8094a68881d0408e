//! Shared helpers for agentdocs integration tests.

#![allow(dead_code)]

use agentdocs::config::GlobalConfig;
use agentdocs::test_utils::ZipFixture;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// A scratch project directory plus an isolated config file.
///
/// Every command runs with `-C <project>`, `AGENTDOCS_CONFIG` pointing at
/// the scratch config and progress bars off, so nothing reads the real
/// home directory or the network.
pub struct TestProject {
    project: TempDir,
    archives: TempDir,
    config: GlobalConfig,
}

impl TestProject {
    pub fn new() -> Self {
        agentdocs::test_utils::init_test_logging(None);
        Self {
            project: TempDir::new().unwrap(),
            archives: TempDir::new().unwrap(),
            config: GlobalConfig::default(),
        }
    }

    pub fn path(&self) -> &Path {
        self.project.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.archives.path().join("config.toml")
    }

    /// Serve `fixture` for `source` through a `file://` mirror.
    pub fn mirror_zip(&mut self, source: &str, fixture: &ZipFixture) -> &mut Self {
        let path = self.archives.path().join(format!("{source}.zip"));
        fixture.write_to(&path);
        self.mirror(source, file_url(&path))
    }

    pub fn mirror(&mut self, source: &str, url: impl Into<String>) -> &mut Self {
        self.config.mirrors.insert(source.to_string(), url.into());
        self
    }

    pub fn config_mut(&mut self) -> &mut GlobalConfig {
        &mut self.config
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// `agentdocs <args>` against this project.
    pub fn cmd(&self) -> Command {
        fs::write(self.config_path(), toml::to_string(&self.config).unwrap()).unwrap();

        let mut cmd = Command::cargo_bin("agentdocs").unwrap();
        cmd.env("AGENTDOCS_CONFIG", self.config_path())
            .env("AGENTDOCS_NO_PROGRESS", "1")
            .env_remove("RUST_LOG")
            .arg("-C")
            .arg(self.path());
        cmd
    }

    /// A scratch directory outside the project for extra fixtures.
    pub fn archives_dir(&self) -> &Path {
        self.archives.path()
    }
}

pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

pub fn turbo_fixture() -> ZipFixture {
    ZipFixture::new("turbo-site-main")
        .file("README.md", "# turbo-site")
        .file("_source/handbook/01_introduction.md", "# Intro")
        .file("_source/handbook/02_drive.md", "# Drive")
        .file("_source/reference/frames.md", "# Frames")
        .file("assets/js/site.js", "console.log('skipped')")
}

pub fn stimulus_fixture() -> ZipFixture {
    ZipFixture::new("stimulus-site-main")
        .file("_source/handbook/01_introduction.md", "# Intro")
        .file("_source/reference/controllers.md", "# Controllers")
}

pub fn rails_fixture(version: &str) -> ZipFixture {
    ZipFixture::new(format!("rails-{version}"))
        .file("guides/source/active_record_basics.md", "# Basics")
        .file("guides/source/action_controller_overview.md", "# Controllers")
        .file("guides/source/getting_started.md", "# Getting started")
        .file("activerecord/README.rdoc", "skipped")
}

pub fn git_available() -> bool {
    StdCommand::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
}

/// Commit `files` into a fresh repository under `dir`.
pub fn init_git_repo(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for (relative, content) in files {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    let git = |args: &[&str]| {
        let output = StdCommand::new("git").args(args).current_dir(dir).output().unwrap();
        assert!(output.status.success(), "git {args:?} failed: {}", String::from_utf8_lossy(&output.stderr));
    };
    git(&["init", "--quiet"]);
    git(&["config", "user.email", "test@agentdocs.example"]);
    git(&["config", "user.name", "Test User"]);
    git(&["add", "."]);
    git(&["commit", "--quiet", "-m", "docs"]);
}
