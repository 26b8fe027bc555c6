use predicates::prelude::*;
use promptctl_cli::test_utils::SAMPLE_TEMPLATE;

use crate::common::TestProject;

/// Without values every control renders its default
#[test]
fn test_render_defaults() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", SAMPLE_TEMPLATE).unwrap();

    project
        .command()
        .args(["render", "prompt.md"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Write a Fantasy story for John.\nCreativity: 75\nDone."));
}

/// Flags assign text and toggle values
#[test]
fn test_render_with_flags() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", SAMPLE_TEMPLATE).unwrap();

    let output = project
        .run_promptctl(&[
            "render",
            "prompt.md",
            "--set",
            "Name=Ada",
            "--set",
            "Genre=Horror",
            "--enable",
            "Include_Details",
        ])
        .unwrap();
    output.assert_success();
    assert_eq!(
        output.stdout,
        "Write a Horror story for Ada.\nCreativity: 75\nDetails for Ada in a castle.\nDone."
    );
}

/// Global config < values file < flags
#[test]
fn test_render_value_precedence() {
    let project = TestProject::new().unwrap();
    project
        .write_file("prompt.md", "{{text:A:a}} {{text:B:b}} {{text:C:c}} {{slider:D}}")
        .unwrap();
    project.write_config("[values]\nA = \"global\"\nB = \"global\"\nC = \"global\"\n").unwrap();
    project.write_file("values.json", r#"{"B": "file", "C": "file", "D": 12}"#).unwrap();

    let output = project
        .run_promptctl(&["render", "prompt.md", "--values", "values.json", "--set", "C=flag"])
        .unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "global file flag 12");

    let output = project
        .run_promptctl(&["render", "prompt.md", "--values", "values.json", "--no-global"])
        .unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "a file file 12");
}

/// TOML values files carry typed values
#[test]
fn test_render_with_toml_values() {
    let project = TestProject::new().unwrap();
    project
        .write_file("prompt.md", "{{toggle:Intro}}Hi. {{/toggle:Intro}}Level {{slider:Level:5}}")
        .unwrap();
    project.write_file("values.toml", "Intro = true\nLevel = 7.5\n").unwrap();

    let output =
        project.run_promptctl(&["render", "prompt.md", "--values", "values.toml"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "Hi. Level 7.5");
}

/// `--disable` overrides a truthy global value
#[test]
fn test_render_disable_overrides_global() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", "A{{toggle:Extra}}B{{/toggle:Extra}}C").unwrap();
    project.write_config("[values]\nExtra = true\n").unwrap();

    let output = project.run_promptctl(&["render", "prompt.md"]).unwrap();
    assert_eq!(output.stdout, "ABC");

    let output = project.run_promptctl(&["render", "prompt.md", "--disable", "Extra"]).unwrap();
    assert_eq!(output.stdout, "AC");
}

/// Text "false" is a non-empty string and therefore keeps the toggle
#[test]
fn test_render_text_false_is_truthy() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", "{{toggle:T}}kept{{/toggle:T}}").unwrap();

    let output = project.run_promptctl(&["render", "prompt.md", "--set", "T=false"]).unwrap();
    assert_eq!(output.stdout, "kept");
}

/// Rendering from stdin to an output file
#[test]
fn test_render_stdin_to_file() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["render", "-", "--set", "Name=Zed", "-o", "out/prompt.txt"])
        .write_stdin("Hello {{text:Name:John}}!")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(project.read_file("out/prompt.txt").unwrap(), "Hello Zed!");
}

/// Unknown value names are warned about with a suggestion
#[test]
fn test_render_warns_about_unknown_names() {
    let project = TestProject::new().unwrap();
    project.write_file("prompt.md", "{{toggle:Include_Details}}x{{/toggle:Include_Details}}").unwrap();

    let output =
        project.run_promptctl(&["render", "prompt.md", "--enable", "Include_Detail"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "");
    output.assert_stderr_contains("No control named 'Include_Detail'");
    output.assert_stderr_contains("did you mean 'Include_Details'?");

    // Quiet mode hides warnings
    let output = project
        .run_promptctl(&["--quiet", "render", "prompt.md", "--enable", "Include_Detail"])
        .unwrap();
    output.assert_success();
    assert!(!output.stderr.contains("No control named"));
}

/// Malformed directives pass through unchanged
#[test]
fn test_render_leaves_malformed_syntax() {
    let project = TestProject::new().unwrap();
    let text = "{{toggle:Open}}body {{dropdown:X:a|b}} {{text:Name:N}}";
    project.write_file("prompt.md", text).unwrap();

    let output = project.run_promptctl(&["render", "prompt.md"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "{{toggle:Open}}body {{dropdown:X:a|b}} N");
}
