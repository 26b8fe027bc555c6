use predicates::prelude::*;
use promptctl_cli::config::GlobalConfig;
use promptctl_cli::controls::ControlValue;

use crate::common::TestProject;

/// `config path` prints the overridden location
#[test]
fn test_config_path() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(project.config_path().display().to_string()));
}

/// Showing a missing config suggests `config init`
#[test]
fn test_config_show_empty() {
    let project = TestProject::new().unwrap();

    let output = project.run_promptctl(&["config", "show"]).unwrap();
    output.assert_success();
    output.assert_stdout_contains("No global values configured.");
    output.assert_stdout_contains("promptctl config init");
}

/// `config init` writes the example and refuses to overwrite without --force
#[tokio::test]
async fn test_config_init() {
    let project = TestProject::new().unwrap();

    let output = project.run_promptctl(&["config", "init"]).unwrap();
    output.assert_success();
    output.assert_stdout_contains("Created global config");

    let config = GlobalConfig::load_from(project.config_path()).await.unwrap();
    assert_eq!(config, GlobalConfig::init_example());

    let output = project.run_promptctl(&["config", "init"]).unwrap();
    output.assert_success();
    output.assert_stdout_contains("already exists");
}

/// Typed values set from the command line drive rendering
#[tokio::test]
async fn test_config_set_unset_and_render() {
    let project = TestProject::new().unwrap();
    project
        .write_file("prompt.md", "{{text:Tone:neutral}}{{toggle:Ex}} +examples{{/toggle:Ex}}")
        .unwrap();

    project.run_promptctl(&["config", "set", "Tone", "formal"]).unwrap().assert_success();
    project.run_promptctl(&["config", "set", "Ex", "on", "--bool"]).unwrap().assert_success();
    project.run_promptctl(&["config", "set", "Heat", "70", "--number"]).unwrap().assert_success();

    let config = GlobalConfig::load_from(project.config_path()).await.unwrap();
    assert_eq!(config.get_value("Tone"), Some(&ControlValue::from("formal")));
    assert_eq!(config.get_value("Ex"), Some(&ControlValue::Bool(true)));
    assert_eq!(config.get_value("Heat"), Some(&ControlValue::Number(70.0)));

    let output = project.run_promptctl(&["render", "prompt.md"]).unwrap();
    assert_eq!(output.stdout, "formal +examples");

    project.run_promptctl(&["config", "unset", "Ex"]).unwrap().assert_success();
    let output = project.run_promptctl(&["render", "prompt.md"]).unwrap();
    assert_eq!(output.stdout, "formal");

    project
        .run_promptctl(&["config", "unset", "Ex"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("Global value 'Ex' not found");
}

/// Bad typed values are rejected
#[test]
fn test_config_set_invalid_bool() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["config", "set", "Ex", "perhaps", "--bool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'perhaps' is not a boolean"));
}
