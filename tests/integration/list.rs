use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

#[test]
fn test_list_shows_every_source() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("rails"))
        .stdout(predicate::str::contains("turbo"))
        .stdout(predicate::str::contains("stimulus"))
        .stdout(predicate::str::contains("alpine"))
        .stdout(predicate::str::contains("RAILS-AGENTS-MD"))
        .stdout(predicate::str::contains("4 sources"));
}

#[test]
fn test_list_json_reports_mirrors() {
    let mut project = TestProject::new();
    project.mirror("turbo", "https://mirror.local/turbo.zip");

    let output = project.cmd().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);

    let turbo = rows.iter().find(|row| row["name"] == "turbo").unwrap();
    assert_eq!(turbo["archive"], "https://mirror.local/turbo.zip");
    assert_eq!(turbo["mirrored"], true);

    let alpine = rows.iter().find(|row| row["name"] == "alpine").unwrap();
    assert_eq!(alpine["transport"], "git");
    assert_eq!(alpine["cache_dir"], ".alpine-docs");
}
