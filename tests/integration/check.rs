use predicates::prelude::*;

use crate::common::TestProject;

/// A clean template passes, even in strict mode
#[test]
fn test_check_clean_template() {
    let project = TestProject::new().unwrap();
    project
        .write_file("prompt.md", "Hi {{text:Name}}{{toggle:T}} {{select:A:x|y}}{{/toggle:T}}")
        .unwrap();

    project
        .command()
        .args(["check", "prompt.md", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) checked, no problems found"));
}

/// Diagnostics are printed with line and column
#[test]
fn test_check_reports_locations() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "prompt.md",
            "Intro\n  {{toggle:Extra}} never closed\n{{dropdown:Genre:a|b}}\n{{/toggle:Gone}}",
        )
        .unwrap();

    let output = project.run_promptctl(&["check", "prompt.md"]).unwrap();
    output.assert_success();
    output.assert_stdout_contains("prompt.md:2:3: warning: toggle 'Extra' is never closed");
    output.assert_stdout_contains("prompt.md:3:1: warning: unknown control kind 'dropdown'");
    output.assert_stdout_contains(
        "prompt.md:4:1: warning: closing tag for toggle 'Gone' has no matching opener",
    );
    output.assert_stdout_contains("3 problem(s) found");
}

/// Strict mode turns diagnostics into a failing exit status
#[test]
fn test_check_strict_fails() {
    let project = TestProject::new().unwrap();
    project.write_file("a.md", "{{text:Name:John}} {{text:Name:Jane}}").unwrap();

    project
        .command()
        .args(["check", "a.md", "--strict"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("redeclared as 'Jane'"))
        .stderr(predicate::str::contains("Template check failed with 1 diagnostic(s)"));
}

/// JSON output carries the diagnostic kind and position
#[test]
fn test_check_json_output() {
    let project = TestProject::new().unwrap();
    project
        .write_file("a.md", "{{toggle:Outer}}{{toggle:Inner}}x{{/toggle:Inner}}{{/toggle:Outer}}")
        .unwrap();

    let output = project.run_promptctl(&["check", "a.md", "--format", "json"]).unwrap();
    output.assert_success();

    let json: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    let findings = json.as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["file"], "a.md");
    assert_eq!(findings[0]["kind"], "nested_toggle");
    assert_eq!(findings[0]["name"], "Inner");
    assert_eq!(findings[0]["parent"], "Outer");
    assert_eq!(findings[0]["line"], 1);
    assert_eq!(findings[0]["column"], 17);
}
