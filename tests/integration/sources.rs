use agentdocs::markdown::MarkerPair;
use agentdocs::test_utils::{gemfile_lock_git, gemfile_lock_resolved};
use predicates::prelude::*;

use crate::common::{
    TestProject, file_url, git_available, init_git_repo, rails_fixture, stimulus_fixture,
    turbo_fixture,
};

#[test]
fn test_turbo_writes_index_and_gitignore() {
    let mut project = TestProject::new();
    project.mirror_zip("turbo", &turbo_fixture());

    project
        .cmd()
        .args(["turbo", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetching Turbo documentation..."))
        .stdout(predicate::str::contains("✓ Updated CLAUDE.md"))
        .stdout(predicate::str::contains("✓ Turbo docs ready!"));

    let claude = project.read("CLAUDE.md");
    let index = MarkerPair::new("TURBO-AGENTS-MD").extract(&claude).unwrap().to_string();
    assert_eq!(
        index,
        "[Turbo Docs]|root:.turbo-docs/_source|Refresh: agentdocs turbo|\
         handbook:{introduction,drive}|reference:{frames}"
    );
    assert_eq!(project.read(".gitignore"), ".turbo-docs/\n");
    assert!(project.exists(".turbo-docs/README.md"));
    assert!(!project.exists(".turbo-docs/assets"));
}

#[test]
fn test_rails_version_from_gemfile_lock() {
    let mut project = TestProject::new();
    project.mirror_zip("rails", &rails_fixture("7.1.3"));
    project.write("Gemfile.lock", &gemfile_lock_resolved("7.1.3"));

    project
        .cmd()
        .args(["rails", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Rails 7.1.3 docs ready!"));

    let claude = project.read("CLAUDE.md");
    let index = MarkerPair::new("RAILS-AGENTS-MD").extract(&claude).unwrap();
    assert!(index.starts_with("[Rails 7.1.3 Docs]|root:.rails-docs/rails-7.1.3/guides/source|"));
    assert!(index.contains("active_record:{basics}"));
    assert!(index.contains("action_controller:{overview}"));
    assert!(project.exists(".rails-docs/rails-7.1.3/guides/source/getting_started.md"));
    assert!(!project.exists(".rails-docs/rails-7.1.3/activerecord"));
}

#[test]
fn test_rails_git_source_with_explicit_version() {
    let mut project = TestProject::new();
    project.mirror_zip("rails", &rails_fixture("8.0.1"));
    project.write("Gemfile.lock", &gemfile_lock_git(None));

    project.cmd().args(["rails", "-y", "-r", "8.0.1"]).assert().success();

    assert!(project.read("CLAUDE.md").contains("[Rails 8.0.1 Docs]"));
}

#[test]
fn test_sources_share_one_file() {
    let mut project = TestProject::new();
    project.mirror_zip("turbo", &turbo_fixture());
    project.mirror_zip("stimulus", &stimulus_fixture());
    project.write("CLAUDE.md", "# Project notes\n");

    project.cmd().args(["turbo", "-y"]).assert().success();
    project.cmd().args(["stimulus", "-y"]).assert().success();

    let claude = project.read("CLAUDE.md");
    assert!(claude.starts_with("# Project notes\n\n<!-- TURBO-AGENTS-MD-START -->"));
    assert!(MarkerPair::new("TURBO-AGENTS-MD").extract(&claude).is_some());
    assert!(
        MarkerPair::new("STIMULUS-AGENTS-MD")
            .extract(&claude)
            .unwrap()
            .contains("handbook:{introduction}|reference:{controllers}")
    );

    let gitignore = project.read(".gitignore");
    assert_eq!(gitignore, ".turbo-docs/\n.stimulus-docs/\n");
}

#[test]
fn test_rerun_uses_cache_and_keeps_single_block() {
    let mut project = TestProject::new();
    project.mirror_zip("turbo", &turbo_fixture());

    project.cmd().args(["turbo", "-y"]).assert().success();

    // The mirror is gone; a second run must not need it.
    project.mirror("turbo", "file:///nonexistent/turbo.zip");
    project
        .cmd()
        .args(["turbo", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already cached"));

    let claude = project.read("CLAUDE.md");
    assert_eq!(claude.matches("<!-- TURBO-AGENTS-MD-START -->").count(), 1);
    assert_eq!(project.read(".gitignore"), ".turbo-docs/\n");
}

#[test]
fn test_force_refetches() {
    let mut project = TestProject::new();
    project.mirror_zip("turbo", &turbo_fixture());
    project.cmd().args(["turbo", "-y"]).assert().success();

    project.mirror("turbo", "file:///nonexistent/turbo.zip");
    project
        .cmd()
        .args(["turbo", "-y", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("turbo docs not found at file:///nonexistent/turbo.zip"));
}

#[test]
fn test_agents_md_is_used_when_it_is_the_only_file() {
    let mut project = TestProject::new();
    project.mirror_zip("stimulus", &stimulus_fixture());
    project.write("AGENTS.md", "# Agents\n");

    project.cmd().args(["stimulus", "-y"]).assert().success();

    assert!(!project.exists("CLAUDE.md"));
    assert!(project.read("AGENTS.md").contains("<!-- STIMULUS-AGENTS-MD-START -->"));
}

#[test]
fn test_output_flag_and_config_default() {
    let mut project = TestProject::new();
    project.mirror_zip("turbo", &turbo_fixture());
    project.mirror_zip("stimulus", &stimulus_fixture());
    project.config_mut().output = Some("docs/AGENTS.md".to_string());

    project.cmd().args(["turbo", "-y"]).assert().success();
    project.cmd().args(["stimulus", "-y", "-o", "NOTES.md"]).assert().success();

    assert!(project.read("docs/AGENTS.md").contains("TURBO-AGENTS-MD-START"));
    assert!(project.read("NOTES.md").contains("STIMULUS-AGENTS-MD-START"));
}

#[test]
fn test_quiet_prints_nothing() {
    let mut project = TestProject::new();
    project.mirror_zip("turbo", &turbo_fixture());

    project.cmd().args(["-q", "turbo", "-y"]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_alpine_clones_and_skips_stub_pages() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let mut project = TestProject::new();
    let repo = project.archives_dir().join("alpine");
    init_git_repo(
        &repo,
        &[
            ("essentials/installation.md", "# Installation\n\nUse a CDN."),
            ("essentials/index.md", "---\norder: 1\n---\n"),
            ("directives/data.md", "# x-data"),
        ],
    );
    project.mirror("alpine", file_url(&repo));

    project.cmd().args(["alpine", "-y"]).assert().success();

    let claude = project.read("CLAUDE.md");
    let index = MarkerPair::new("ALPINE-AGENTS-MD").extract(&claude).unwrap();
    assert!(index.starts_with("[Alpine.js Docs]|root:.alpine-docs|"));
    assert!(index.contains("essentials:{installation}"));
    assert!(index.contains("directives:{data}"));
    assert_eq!(project.read(".gitignore"), ".alpine-docs/\n");
}
