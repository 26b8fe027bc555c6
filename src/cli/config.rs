//! Manage the global configuration.
//!
//! The global configuration stores control values applied to every render.
//! Values are text unless `--bool` or `--number` is given.
//!
//! ```bash
//! promptctl config init
//! promptctl config set Tone formal
//! promptctl config set Include_Examples true --bool
//! promptctl config set Creativity 70 --number
//! promptctl config unset Tone
//! promptctl config show
//! promptctl config path
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::GlobalConfig;
use crate::controls::ControlValue;
use crate::core::PromptctlError;

/// Command to manage the global configuration.
#[derive(Args)]
pub struct ConfigCommand {
    /// Configuration subcommand (defaults to `show`)
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write an example configuration
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Set a global value
    Set {
        /// Control name
        name: String,

        /// Value to assign
        value: String,

        /// Store the value as a boolean (true/false, yes/no, on/off, 1/0)
        #[arg(long = "bool", conflicts_with = "as_number")]
        as_bool: bool,

        /// Store the value as a number
        #[arg(long = "number")]
        as_number: bool,
    },

    /// Remove a global value
    Unset {
        /// Control name
        name: String,
    },
}

impl ConfigCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let path = match config_path {
            Some(path) => path,
            None => GlobalConfig::default_path()?,
        };

        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(force, path).await,
            Some(ConfigSubcommands::Show) | None => Self::show(path).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", path.display());
                Ok(())
            }
            Some(ConfigSubcommands::Set {
                name,
                value,
                as_bool,
                as_number,
            }) => Self::set(name, &value, as_bool, as_number, path).await,
            Some(ConfigSubcommands::Unset {
                name,
            }) => Self::unset(&name, path).await,
        }
    }

    async fn init(force: bool, path: PathBuf) -> Result<()> {
        if path.exists() && !force {
            println!("❌ Global config already exists at: {}", path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let config = GlobalConfig::init_example();
        config.save_to(&path).await?;

        println!("✅ Created global config at: {}", path.display());
        println!("\n{}", "Example configuration:".bold());
        println!("{}", toml::to_string_pretty(&config)?);
        println!("{}", "Next steps:".yellow());
        println!("  Replace the example values with ones used across your templates");
        Ok(())
    }

    async fn show(path: PathBuf) -> Result<()> {
        let config = GlobalConfig::load_with_optional(Some(path.clone())).await?;

        println!("{}", "Global Configuration".bold());
        println!("Location: {}\n", path.display());

        if config.values.is_empty() {
            println!("No global values configured.");
            println!("\n{}", "Tip:".yellow());
            println!("  Run 'promptctl config init' to create an example configuration");
        } else {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Ok(())
    }

    async fn set(
        name: String,
        raw: &str,
        as_bool: bool,
        as_number: bool,
        path: PathBuf,
    ) -> Result<()> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(PromptctlError::ConfigError {
                message: "value name must not be empty".to_string(),
            }
            .into());
        }
        let value = typed_value(raw, as_bool, as_number)?;

        let mut config = GlobalConfig::load_with_optional(Some(path.clone())).await?;
        if let Some(previous) = config.get_value(&name) {
            println!("⚠️  Replacing '{name}' (was {previous})");
        }
        config.set_value(name.clone(), value.clone());
        config.save_to(&path).await?;

        println!("✅ Set global value '{}' = {}", name.green(), value);
        Ok(())
    }

    async fn unset(name: &str, path: PathBuf) -> Result<()> {
        let mut config = GlobalConfig::load_with_optional(Some(path.clone())).await?;

        if config.unset_value(name) {
            config.save_to(&path).await?;
            println!("✅ Removed global value '{}'", name.red());
        } else {
            println!("❌ Global value '{name}' not found");
        }
        Ok(())
    }
}

/// Interpret a raw command-line value according to the type flags.
fn typed_value(raw: &str, as_bool: bool, as_number: bool) -> Result<ControlValue> {
    if as_bool {
        return match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(ControlValue::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(ControlValue::Bool(false)),
            _ => Err(PromptctlError::ConfigError {
                message: format!("'{raw}' is not a boolean"),
            }
            .into()),
        };
    }
    if as_number {
        return match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(ControlValue::Number(n)),
            _ => Err(PromptctlError::ConfigError {
                message: format!("'{raw}' is not a finite number"),
            }
            .into()),
        };
    }
    Ok(ControlValue::from(raw))
}
