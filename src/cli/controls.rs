//! List distinct controls across templates.
//!
//! Useful for deciding which values belong in the global configuration: a
//! control that appears in many templates is a good candidate. Controls are
//! identified by kind and name; the first declaration seen supplies the
//! default.
//!
//! ```bash
//! promptctl controls 'prompts/*.md'
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashMap;

use super::common::{OutputFormat, expand_inputs, read_template};
use super::parse::describe;
use crate::controls::{ControlDeclaration, ControlKind, SliderRange, controls, parse};

/// Command to list controls across files.
#[derive(Args)]
pub struct ControlsCommand {
    /// Template files or glob patterns
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// A control and the templates declaring it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct ControlUsage {
    kind: ControlKind,
    name: String,
    default_value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<SliderRange>,
    files: Vec<String>,
    #[serde(skip)]
    declaration: ControlDeclaration,
}

impl ControlsCommand {
    pub async fn execute(self) -> Result<()> {
        let inputs = expand_inputs(&self.inputs)?;

        let mut templates = Vec::with_capacity(inputs.len());
        for input in inputs {
            let text = read_template(&input).await?;
            templates.push((input, parse(text.as_str())));
        }
        let usages = collect_usages(&templates);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&usages)?),
            OutputFormat::Text => {
                if usages.is_empty() {
                    println!("No controls found");
                }
                for usage in &usages {
                    println!("{}", describe(&usage.declaration));
                    println!("        {}", usage.files.join(", ").dimmed());
                }
            }
        }
        Ok(())
    }
}

/// Merge the distinct controls of every template, keeping first-seen order.
pub(super) fn collect_usages(templates: &[(String, Vec<ControlDeclaration>)]) -> Vec<ControlUsage> {
    let mut usages: Vec<ControlUsage> = Vec::new();
    let mut index: HashMap<(ControlKind, String), usize> = HashMap::new();

    for (file, declarations) in templates {
        for control in controls(declarations) {
            let key = (control.kind, control.name.clone());
            if let Some(&slot) = index.get(&key) {
                let files = &mut usages[slot].files;
                if !files.contains(file) {
                    files.push(file.clone());
                }
                continue;
            }

            index.insert(key, usages.len());
            usages.push(ControlUsage {
                kind: control.kind,
                name: control.name.clone(),
                default_value: control.default_value.clone(),
                options: control.options.clone(),
                range: control.range,
                files: vec![file.clone()],
                declaration: control,
            });
        }
    }

    tracing::debug!("{} distinct control(s) across {} file(s)", usages.len(), templates.len());
    usages
}
