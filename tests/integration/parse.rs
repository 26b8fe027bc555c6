use predicates::prelude::*;
use promptctl_cli::test_utils::SAMPLE_TEMPLATE;

use crate::common::TestProject;

/// Text output lists top-level controls with nested ones indented
#[test]
fn test_parse_text_output() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", SAMPLE_TEMPLATE).unwrap();

    let output = project.run_promptctl(&["parse", "prompt.md"]).unwrap();
    output.assert_success();

    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines.len(), 6, "unexpected output:\n{}", output.stdout);
    assert!(lines[0].starts_with("select  Genre [Fantasy | Sci-Fi | Mystery] = Fantasy"));
    assert!(lines[1].starts_with("text    Name = \"John\""));
    assert!(lines[2].starts_with("slider  Creativity = 75 (0..100)"));
    assert!(lines[3].starts_with("toggle  Include_Details"));
    assert!(lines[4].starts_with("  text    Name"));
    assert!(lines[5].starts_with("  text    Setting = \"a castle\""));
}

/// JSON output exposes the declaration structure
#[test]
fn test_parse_json_output() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "prompt.md",
            "Hello {{text:Name:John}}! {{toggle:More}}{{slider:Heat:7:0:10}}{{/toggle:More}}",
        )
        .unwrap();

    let output = project.run_promptctl(&["parse", "prompt.md", "--format", "json"]).unwrap();
    output.assert_success();

    let json: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    let declarations = json.as_array().unwrap();
    assert_eq!(declarations.len(), 2);

    assert_eq!(declarations[0]["kind"], "text");
    assert_eq!(declarations[0]["name"], "Name");
    assert_eq!(declarations[0]["default_value"], "John");
    assert_eq!(declarations[0]["span"], serde_json::json!({"start": 6, "end": 24}));

    assert_eq!(declarations[1]["kind"], "toggle");
    assert_eq!(declarations[1]["inner_text"], "{{slider:Heat:7:0:10}}");
    let nested = &declarations[1]["nested"][0];
    assert_eq!(nested["kind"], "slider");
    assert_eq!(nested["range"], serde_json::json!({"min": 0, "max": 10}));
}

/// `-` reads the template from stdin
#[test]
fn test_parse_from_stdin() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["parse", "-"])
        .write_stdin("Pick {{select:Tone:warm|dry}}")
        .assert()
        .success()
        .stdout(predicate::str::contains("select  Tone [warm | dry] = warm"));
}

/// A template without controls is reported as such
#[test]
fn test_parse_plain_text() {
    let project = TestProject::new().unwrap();
    project.write_file("plain.md", "Nothing {here} at all }}").unwrap();

    project
        .command()
        .args(["parse", "plain.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No controls found in plain.md"));

    project
        .command()
        .args(["parse", "plain.md", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}
