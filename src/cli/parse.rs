//! List the control declarations of a template.
//!
//! Top-level declarations are printed in source order; controls declared
//! inside a toggle block are listed indented below it.
//!
//! ```bash
//! promptctl parse prompt.md
//! promptctl parse - --format json < prompt.md
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{OutputFormat, read_template};
use crate::controls::{ControlDeclaration, ControlKind, parse};

/// Command to list the controls of one template.
#[derive(Args)]
pub struct ParseCommand {
    /// Template file, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ParseCommand {
    pub async fn execute(self) -> Result<()> {
        let text = read_template(&self.input).await?;
        let declarations = parse(text.as_str());
        tracing::debug!("{}: {} top-level declaration(s)", self.input, declarations.len());

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&declarations)?),
            OutputFormat::Text => {
                if declarations.is_empty() {
                    println!("No controls found in {}", self.input);
                }
                for declaration in &declarations {
                    println!("{}", describe(declaration));
                    for nested in &declaration.nested {
                        println!("  {}", describe(nested));
                    }
                }
            }
        }
        Ok(())
    }
}

/// One-line summary of a declaration: kind, name and what it defaults to.
pub(super) fn describe(declaration: &ControlDeclaration) -> String {
    let detail = match declaration.kind {
        ControlKind::Text if declaration.default_value.is_empty() => String::new(),
        ControlKind::Text => format!(" = {:?}", declaration.default_value),
        ControlKind::Select if declaration.options.is_empty() => " (no options)".to_string(),
        ControlKind::Select => {
            format!(" [{}] = {}", declaration.options.join(" | "), declaration.default_value)
        }
        ControlKind::Slider => {
            let range = declaration.range.unwrap_or_default();
            format!(" = {} ({}..{})", declaration.default_value, range.min, range.max)
        }
        ControlKind::Toggle => {
            let lines = declaration.inner_text.as_deref().map_or(0, |t| t.lines().count());
            format!(" ({lines} line(s))")
        }
    };

    let repeats = match declaration.spans().len() {
        0 | 1 => String::new(),
        n => format!(" x{n}").dimmed().to_string(),
    };

    format!(
        "{:<7} {}{}{}",
        declaration.kind.as_str().cyan(),
        declaration.name.bold(),
        detail,
        repeats
    )
}
