//! Render a template with control values.
//!
//! Values are layered from three sources, later ones winning:
//!
//! 1. the `[values]` table of the global configuration (unless `--no-global`)
//! 2. a JSON or TOML values file given with `--values`
//! 3. `--set NAME=VALUE`, `--enable NAME` and `--disable NAME` flags
//!
//! Controls left without a value render their declared default. Values whose
//! name matches no control in the template are reported with a warning, with a
//! suggestion when a similarly named control exists.
//!
//! ```bash
//! promptctl render prompt.md --set Name=Alice --enable Include_Details
//! promptctl render prompt.md --values story.toml -o prompt.txt
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::common::{read_template, write_output};
use crate::config::GlobalConfig;
use crate::controls::{ControlDeclaration, ValueMap, controls, parse, render};
use crate::core::PromptctlError;

/// Minimum normalized similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Command to render one template.
#[derive(Args)]
pub struct RenderCommand {
    /// Template file, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: String,

    /// Assign a text value (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Turn a toggle on (repeatable)
    #[arg(long, value_name = "NAME")]
    enable: Vec<String>,

    /// Turn a toggle off (repeatable)
    #[arg(long, value_name = "NAME")]
    disable: Vec<String>,

    /// JSON or TOML file with a flat table of values
    #[arg(long, value_name = "FILE")]
    values: Option<PathBuf>,

    /// Ignore values from the global configuration
    #[arg(long)]
    no_global: bool,

    /// Write the rendered text to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let text = read_template(&self.input).await?;
        let declarations = parse(text.as_str());

        let global = if self.no_global {
            ValueMap::new()
        } else {
            GlobalConfig::load_with_optional(config_path).await?.values
        };
        let file_values = match &self.values {
            Some(path) => load_values_file(path).await?,
            None => ValueMap::new(),
        };
        let flag_values = self.flag_values()?;

        warn_unknown_names(&declarations, file_values.names().chain(flag_values.names()));

        let values = global.layered(&file_values).layered(&flag_values);
        tracing::debug!(
            "Rendering {} with {} value(s) for {} control(s)",
            self.input,
            values.len(),
            controls(&declarations).len()
        );

        let rendered = render(&text, &declarations, &values);
        write_output(self.output.as_deref(), &rendered).await
    }

    /// Values given directly on the command line.
    fn flag_values(&self) -> Result<ValueMap> {
        let mut values = ValueMap::new();
        for assignment in &self.set {
            let (name, value) = parse_assignment(assignment)?;
            values.insert(name, value);
        }
        for name in &self.enable {
            values.insert(name.trim(), true);
        }
        for name in &self.disable {
            values.insert(name.trim(), false);
        }
        Ok(values)
    }
}

/// Split `NAME=VALUE` at the first `=`. The name is trimmed; the value is
/// kept as written.
pub(super) fn parse_assignment(input: &str) -> Result<(&str, &str)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(PromptctlError::InvalidAssignment {
            input: input.to_string(),
        }
        .into()),
    }
}

/// Load a flat table of values from a `.json` or `.toml` file.
pub(super) async fn load_values_file(path: &Path) -> Result<ValueMap> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read values file {}", path.display()))?;

    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    let parsed = match extension.as_deref() {
        Some("json") => serde_json::from_str::<ValueMap>(&content).map_err(|e| e.to_string()),
        Some("toml") => toml::from_str::<ValueMap>(&content).map_err(|e| e.to_string()),
        _ => {
            return Err(PromptctlError::UnsupportedValuesFormat {
                file: path.display().to_string(),
            }
            .into());
        }
    };

    let values = parsed.map_err(|reason| PromptctlError::ValuesParseError {
        file: path.display().to_string(),
        reason: reason.trim_end().to_string(),
    })?;
    tracing::debug!("Loaded {} value(s) from {}", values.len(), path.display());
    Ok(values)
}

fn warn_unknown_names<'a>(
    declarations: &[ControlDeclaration],
    names: impl Iterator<Item = &'a str>,
) {
    let known: Vec<String> = controls(declarations).into_iter().map(|c| c.name).collect();
    for name in names {
        if known.iter().any(|k| k == name) {
            continue;
        }
        match suggest(name, &known) {
            Some(candidate) => tracing::warn!(
                "No control named '{}' in the template (did you mean '{}'?)",
                name,
                candidate
            ),
            None => tracing::warn!("No control named '{}' in the template", name),
        }
    }
}

/// The known name most similar to `name`, if any is similar enough.
pub(super) fn suggest<'a>(name: &str, known: &'a [String]) -> Option<&'a str> {
    let lowered = name.to_lowercase();
    known
        .iter()
        .map(|k| (k, strsim::normalized_levenshtein(&lowered, &k.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k.as_str())
}
