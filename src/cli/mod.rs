//! Command-line interface for promptctl.
//!
//! The CLI wraps the control engine in [`crate::controls`] with file handling,
//! value layering and output formatting. Each subcommand lives in its own
//! module and exposes an `execute` method.
//!
//! # Commands
//!
//! - `parse` - list the control declarations of a template
//! - `render` - render a template with values
//! - `controls` - list distinct controls across several templates
//! - `check` - report directives that will not behave as written
//! - `config` - manage the global configuration
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging on stderr
//! - `--quiet` / `-q`: errors only
//! - `--config` / `-c`: path to the global configuration file
//!
//! `RUST_LOG` takes precedence over both verbosity flags.
//!
//! # Examples
//!
//! ```bash
//! # Show the controls a prompt declares
//! promptctl parse prompt.md
//!
//! # Render with values
//! promptctl render prompt.md --set Name=Alice --enable Include_Details
//!
//! # Fail CI on suspicious directives
//! promptctl check 'prompts/**/*.md' --strict
//! ```

mod check;
pub mod common;
mod config;
mod controls;
mod parse;
mod render;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global CLI flags.
///
/// Built once by [`Cli::build_config`] and passed to command execution, so
/// tests can construct one directly instead of parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive used when `RUST_LOG` is not set.
    ///
    /// `None` leaves logging uninitialised.
    pub log_level: Option<String>,

    /// Explicit global configuration file, overriding the default location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Set the global configuration path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Install the tracing subscriber, writing to stderr.
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Main CLI structure for promptctl.
#[derive(Parser)]
#[command(
    name = "promptctl",
    about = "Render prompt templates with interactive control syntax",
    version,
    long_about = "promptctl parses {{text:...}}, {{select:...}}, {{slider:...}} and {{toggle:...}} \
                  controls embedded in prompt text, and renders the text with chosen values."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the control declarations of a template
    Parse(parse::ParseCommand),

    /// Render a template with control values
    Render(render::RenderCommand),

    /// List distinct controls across templates
    Controls(controls::ControlsCommand),

    /// Report directives that will not behave as written
    Check(check::CheckCommand),

    /// Manage the global configuration
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns whatever error the subcommand produced.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Derive a [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute the command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns whatever error the subcommand produced.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Parse(cmd) => cmd.execute().await,
            Commands::Render(cmd) => cmd.execute(config.config_path).await,
            Commands::Controls(cmd) => cmd.execute().await,
            Commands::Check(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(config.config_path).await,
        }
    }
}
