//! Report directives that will not behave as written.
//!
//! Rendering never fails on malformed syntax, so a typo in a control silently
//! ends up as literal text in the prompt. `check` runs the template lint and
//! prints each finding as `file:line:column: message`. With `--strict` any
//! finding makes the command fail, for use in CI.
//!
//! ```bash
//! promptctl check 'prompts/**/*.md' --strict
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{OutputFormat, expand_inputs, read_template};
use crate::controls::lint::line_col;
use crate::controls::{Diagnostic, check};
use crate::core::PromptctlError;

/// Command to lint templates.
#[derive(Args)]
pub struct CheckCommand {
    /// Template files, glob patterns, or `-` for stdin
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<String>,

    /// Exit with an error if any diagnostic is reported
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// A diagnostic located in a file.
#[derive(Debug, Clone, Serialize)]
struct Finding {
    file: String,
    line: usize,
    column: usize,
    message: String,
    #[serde(flatten)]
    diagnostic: Diagnostic,
}

impl CheckCommand {
    pub async fn execute(self) -> Result<()> {
        let inputs = expand_inputs(&self.inputs)?;

        let mut findings = Vec::new();
        for input in &inputs {
            let text = read_template(input).await?;
            for diagnostic in check(&text) {
                let (line, column) = line_col(&text, diagnostic.span.start);
                findings.push(Finding {
                    file: input.clone(),
                    line,
                    column,
                    message: diagnostic.to_string(),
                    diagnostic,
                });
            }
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&findings)?),
            OutputFormat::Text => {
                for finding in &findings {
                    println!(
                        "{}:{}:{}: {}: {}",
                        finding.file,
                        finding.line,
                        finding.column,
                        "warning".yellow().bold(),
                        finding.message
                    );
                }
                if findings.is_empty() {
                    println!("{} {} file(s) checked, no problems found", "✓".green(), inputs.len());
                } else {
                    println!(
                        "{} {} file(s) checked, {} problem(s) found",
                        "⚠".yellow(),
                        inputs.len(),
                        findings.len()
                    );
                }
            }
        }

        if self.strict && !findings.is_empty() {
            return Err(PromptctlError::CheckFailed {
                count: findings.len(),
            }
            .into());
        }
        Ok(())
    }
}
