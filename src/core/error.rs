//! Error handling for promptctl
//!
//! The templating engine itself never fails: malformed control syntax is left as
//! literal text. Errors only arise around it, when the command-line front end
//! reads template files, value files and configuration. This module provides:
//!
//! - [`PromptctlError`] - enumerated failure cases of the CLI
//! - [`ErrorContext`] - wrapper adding user-facing details and a suggestion
//! - [`user_friendly_error`] - converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use promptctl_cli::core::{PromptctlError, user_friendly_error};
//!
//! let error = anyhow::Error::from(PromptctlError::InvalidAssignment {
//!     input: "Name".to_string(),
//! });
//! user_friendly_error(error).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for promptctl operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptctlError {
    /// Template file does not exist
    #[error("Template file not found: {path}")]
    TemplateNotFound {
        /// Path that was given on the command line
        path: String,
    },

    /// Template file exists but could not be read as UTF-8 text
    #[error("Failed to read template {path}: {reason}")]
    TemplateReadFailed {
        /// Path to the template
        path: String,
        /// Underlying I/O or decoding failure
        reason: String,
    },

    /// A glob pattern matched no files
    #[error("No files match '{pattern}'")]
    NoMatchingFiles {
        /// The pattern as given
        pattern: String,
    },

    /// A `--set` argument without `=`
    #[error("Invalid value assignment '{input}', expected NAME=VALUE")]
    InvalidAssignment {
        /// The offending argument
        input: String,
    },

    /// Values file could not be parsed
    #[error("Invalid values file {file}: {reason}")]
    ValuesParseError {
        /// Path to the values file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Values file extension is neither `.json` nor `.toml`
    #[error("Unsupported values file format: {file}")]
    UnsupportedValuesFormat {
        /// Path to the values file
        file: String,
    },

    /// Global configuration could not be parsed
    #[error("Invalid configuration file {file}: {reason}")]
    ConfigParseError {
        /// Path to the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// `check --strict` found diagnostics
    #[error("Template check failed with {count} diagnostic(s)")]
    CheckFailed {
        /// Number of diagnostics across all files
        count: usize,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// A [`PromptctlError`] with user-facing details and a suggestion.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PromptctlError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: PromptctlError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] for display.
///
/// Walks the error chain looking for a [`PromptctlError`] or an already built
/// [`ErrorContext`]; I/O and parse errors get generic suggestions. Anything
/// unrecognised keeps its message, with the cause chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(context) = cause.downcast_ref::<ErrorContext>() {
            return context.clone();
        }

        if let Some(promptctl_error) = cause.downcast_ref::<PromptctlError>() {
            return create_error_context(promptctl_error.clone());
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    return ErrorContext::new(PromptctlError::Other {
                        message: error.to_string(),
                    })
                    .with_suggestion("Check the file permissions or run from a directory you own")
                    .with_details(io_error.to_string());
                }
                std::io::ErrorKind::NotFound => {
                    return ErrorContext::new(PromptctlError::Other {
                        message: error.to_string(),
                    })
                    .with_suggestion("Check that the file or directory exists and the path is correct")
                    .with_details(io_error.to_string());
                }
                _ => {}
            }
        }

        if let Some(json_error) = cause.downcast_ref::<serde_json::Error>() {
            return ErrorContext::new(PromptctlError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check the JSON syntax: values must be a flat object of strings, numbers and booleans")
            .with_details(json_error.to_string());
        }

        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return ErrorContext::new(PromptctlError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check the TOML syntax. Verify quotes, brackets and table headers")
            .with_details(toml_error.to_string());
        }
    }

    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(PromptctlError::Other {
        message: error.to_string(),
    });
    if causes.is_empty() {
        context
    } else {
        context.with_details(causes.join(": "))
    }
}

fn create_error_context(error: PromptctlError) -> ErrorContext {
    match &error {
        PromptctlError::TemplateNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the path, or pass '-' to read the template from stdin"),

        PromptctlError::TemplateReadFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Templates must be UTF-8 text files")
            .with_details("The file exists but its contents could not be read as text"),

        PromptctlError::NoMatchingFiles {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the pattern; quote it so the shell does not expand it first"),

        PromptctlError::InvalidAssignment {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use --set Name=value for text, or --enable/--disable Name for toggles"),

        PromptctlError::ValuesParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("The values file must be a flat table of strings, numbers and booleans")
            .with_details("Example (TOML): Name = \"Alice\"\nInclude_Details = true\nCreativity = 70"),

        PromptctlError::UnsupportedValuesFormat {
            ..
        } => ErrorContext::new(error).with_suggestion("Use a .json or .toml values file"),

        PromptctlError::ConfigParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the TOML syntax, or run 'promptctl config path' to locate the file")
            .with_details("Global control values live under a [values] table"),

        PromptctlError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass --config to point at a configuration file explicitly"),

        PromptctlError::CheckFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the reported directives, or run without --strict to only warn"),

        PromptctlError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
