use predicates::prelude::*;

use crate::common::TestProject;

/// Missing templates fail with a suggestion
#[test]
fn test_missing_template() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["render", "nope.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template file not found: nope.md"))
        .stderr(predicate::str::contains("suggestion:"));
}

/// `--set` needs NAME=VALUE
#[test]
fn test_invalid_assignment() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", "{{text:Name}}").unwrap();

    project
        .command()
        .args(["render", "prompt.md", "--set", "Name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value assignment 'Name'"));
}

/// Values files must be JSON or TOML flat tables
#[test]
fn test_bad_values_files() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", "{{text:Name}}").unwrap();
    project.write_file("values.yaml", "Name: x").unwrap();
    project.write_file("values.json", "[1, 2]").unwrap();

    project
        .command()
        .args(["render", "prompt.md", "--values", "values.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported values file format"));

    project
        .command()
        .args(["render", "prompt.md", "--values", "values.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid values file"));
}

/// A broken global config is reported, and `--no-global` avoids reading it
#[test]
fn test_broken_global_config() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", "{{text:Name:ok}}").unwrap();
    project.write_config("[values\n").unwrap();

    project
        .command()
        .args(["render", "prompt.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file"));

    project
        .command()
        .args(["render", "prompt.md", "--no-global"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ok"));
}

/// Templates must be UTF-8
#[test]
fn test_binary_template() {
    let project = TestProject::new().unwrap();
    std::fs::write(project.project_path().join("blob.md"), [0xc3, 0x28, 0xff]).unwrap();

    project
        .command()
        .args(["parse", "blob.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template blob.md"));
}
