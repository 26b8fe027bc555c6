//! Common utilities for CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::core::PromptctlError;

/// Input argument that stands for standard input.
pub const STDIN: &str = "-";

/// Output format for commands that report structured data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output with colors.
    #[default]
    Text,

    /// Pretty-printed JSON for scripting.
    Json,
}

/// Read a template from a file path, or from stdin when `source` is `-`.
///
/// # Errors
///
/// Returns [`PromptctlError::TemplateNotFound`] for a missing file and
/// [`PromptctlError::TemplateReadFailed`] when the contents are not UTF-8 text.
pub async fn read_template(source: &str) -> Result<String> {
    if source == STDIN {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read template from stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(PromptctlError::TemplateNotFound {
            path: source.to_string(),
        }
        .into());
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    let text = String::from_utf8(bytes).map_err(|e| PromptctlError::TemplateReadFailed {
        path: source.to_string(),
        reason: e.utf8_error().to_string(),
    })?;

    tracing::debug!("Read {} byte(s) from {}", text.len(), path.display());
    Ok(text)
}

/// Expand glob patterns into a list of inputs, keeping command-line order.
///
/// Arguments without glob metacharacters (and `-`) are passed through as is,
/// so a missing plain path is reported by [`read_template`] instead. Each
/// input appears once, at its first position.
///
/// # Errors
///
/// Returns an error for an invalid pattern, or
/// [`PromptctlError::NoMatchingFiles`] when a pattern matches nothing.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<String>> {
    let mut inputs: Vec<String> = Vec::new();

    for pattern in patterns {
        if pattern == STDIN || !is_glob(pattern) {
            if !inputs.contains(pattern) {
                inputs.push(pattern.clone());
            }
            continue;
        }

        let mut matched = 0;
        for entry in
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern '{pattern}'"))?
        {
            let path = entry.with_context(|| format!("Failed to read a match of '{pattern}'"))?;
            if !path.is_file() {
                continue;
            }
            matched += 1;
            let input = path.display().to_string();
            if !inputs.contains(&input) {
                inputs.push(input);
            }
        }

        tracing::debug!("Pattern '{}' matched {} file(s)", pattern, matched);
        if matched == 0 {
            return Err(PromptctlError::NoMatchingFiles {
                pattern: pattern.clone(),
            }
            .into());
        }
    }

    Ok(inputs)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Write `content` to `output`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub async fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::debug!("Wrote {} byte(s) to {}", content.len(), path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await.context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
