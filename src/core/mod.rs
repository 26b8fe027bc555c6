//! Core error types for promptctl
//!
//! The control engine in [`crate::controls`] is infallible. Everything that can
//! go wrong happens in the command-line layer around it: reading templates,
//! loading value files and managing the global configuration. Those failures
//! are described here.
//!
//! - [`PromptctlError`] - strongly-typed failure cases
//! - [`ErrorContext`] - user-facing wrapper with details and a suggestion
//! - [`user_friendly_error`] - turns any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use promptctl_cli::core::{PromptctlError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn load() -> Result<String> {
//!     Err(PromptctlError::TemplateNotFound {
//!         path: "prompt.md".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = load() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, PromptctlError, user_friendly_error};
