use predicates::prelude::*;

use agentdocs::test_utils::{gemfile_lock_git, gemfile_lock_resolved};

use crate::common::TestProject;

#[test]
fn test_rails_without_lockfile() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["rails", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Gemfile.lock not found"));

    assert!(!project.exists("CLAUDE.md"));
    assert!(!project.exists(".gitignore"));
}

#[test]
fn test_rails_git_source_requires_version_under_yes() {
    let project = TestProject::new();
    project.write("Gemfile.lock", &gemfile_lock_git(Some("main")));

    project
        .cmd()
        .args(["rails", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Rails installed from git source (main)"))
        .stderr(predicate::str::contains("--rails-version"));
}

#[test]
fn test_missing_archive_leaves_project_untouched() {
    let mut project = TestProject::new();
    project.mirror("stimulus", "file:///nonexistent/stimulus.zip");
    project.write("CLAUDE.md", "# Notes\n");

    project
        .cmd()
        .args(["stimulus", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stimulus docs not found"));

    assert_eq!(project.read("CLAUDE.md"), "# Notes\n");
    assert!(!project.exists(".stimulus-docs"));
}

#[test]
fn test_unknown_subcommand() {
    let project = TestProject::new();
    project.cmd().arg("django").assert().failure().stderr(predicate::str::contains("django"));
}

#[test]
fn test_mistyped_source_is_rejected_with_suggestion() {
    let project = TestProject::new();
    project.write("Gemfile.lock", &gemfile_lock_resolved("7.1.3"));

    project
        .cmd()
        .args(["rials", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand 'rials'"))
        .stderr(predicate::str::contains("rails"));

    assert!(!project.exists("CLAUDE.md"));
    assert!(!project.exists(".rails-docs"));
}

#[test]
fn test_explicit_missing_config() {
    let project = TestProject::new();
    project
        .cmd()
        .args(["--config", "/nonexistent/agentdocs.toml", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn test_malformed_config() {
    let project = TestProject::new();
    let config = project.archives_dir().join("broken.toml");
    std::fs::write(&config, "mirrors = [not toml").unwrap();

    project
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(1);
}
