//! Global configuration for promptctl.
//!
//! The global configuration file holds control values that apply to every
//! render, so that recurring controls (a preferred tone, an author name, a
//! default creativity level) do not have to be passed on each invocation.
//!
//! # Configuration File Location
//!
//! - **Unix/macOS**: `~/.promptctl/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\promptctl\config.toml`
//!
//! The location can be overridden with the global `--config` flag.
//!
//! # File Format
//!
//! ```toml
//! # Values applied to every render unless overridden
//! [values]
//! Tone = "friendly"
//! Include_Examples = true
//! Creativity = 70
//! ```
//!
//! Values are typed: strings fill text controls, booleans drive toggles and
//! numbers are printed in their shortest form.
//!
//! # Examples
//!
//! ```rust,no_run
//! use promptctl_cli::config::GlobalConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = GlobalConfig::load().await?;
//! config.set_value("Tone", "formal");
//! config.save().await?;
//! # Ok(())
//! # }
//! ```

use crate::controls::{ControlValue, ValueMap};
use crate::core::PromptctlError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Global configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Control values applied to every render.
    ///
    /// Lowest precedence: a values file and command-line assignments both
    /// override these.
    #[serde(default, skip_serializing_if = "ValueMap::is_empty")]
    pub values: ValueMap,
}

impl GlobalConfig {
    /// Load global configuration from the default location.
    ///
    /// Returns the default (empty) configuration when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load global configuration from `path`, or from the default location
    /// when `path` is `None`.
    ///
    /// A missing file yields the default configuration in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No global config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load global configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (permissions, not found, etc.)
    /// - The file is not valid TOML or does not match the expected schema
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| PromptctlError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string().trim_end().to_string(),
        })?;

        tracing::debug!("Loaded {} global value(s) from {}", config.values.len(), path.display());
        Ok(config)
    }

    /// Save global configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the default path cannot be determined or the file
    /// cannot be written.
    pub async fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path).await
    }

    /// Save global configuration to a specific file path.
    ///
    /// Creates parent directories as needed. On Unix the file is restricted to
    /// owner read/write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directories cannot be created
    /// - The file cannot be written
    /// - Serialization to TOML fails
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write global config to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set permissions on {}", path.display())
            })?;
        }

        tracing::debug!("Saved global config to {}", path.display());
        Ok(())
    }

    /// Get the default file path for global configuration.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\promptctl\config.toml`
    /// - **Unix/macOS**: `~/.promptctl/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("promptctl")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".promptctl")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Set a global value, replacing any previous one.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<ControlValue>) {
        self.values.insert(name, value);
    }

    /// Remove a global value. Returns `true` if it was present.
    pub fn unset_value(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    /// Look up a global value.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&ControlValue> {
        self.values.get(name)
    }

    /// Example configuration written by `promptctl config init`.
    #[must_use]
    pub fn init_example() -> Self {
        let mut config = Self::default();
        config.set_value("Tone", "friendly");
        config.set_value("Include_Examples", true);
        config.set_value("Creativity", 70);
        config
    }
}
