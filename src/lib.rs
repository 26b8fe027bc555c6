//! promptctl - interactive control syntax for prompt templates
//!
//! Prompt text can embed lightweight form controls that a user fills in before
//! the prompt is sent:
//!
//! - `{{text:Name:John}}` - free text with an optional default
//! - `{{select:Genre:Fantasy|Sci-Fi|Mystery}}` - one of several options
//! - `{{slider:Creativity:75:0:100}}` - an integer with a default and bounds
//! - `{{toggle:Details}}...{{/toggle:Details}}` - a block kept or removed
//!
//! The library parses these declarations from text and renders the text with
//! chosen values. Parsing never fails: anything malformed stays literal text.
//!
//! # Modules
//!
//! - [`controls`] - the engine: parser, renderer, values and lint
//! - [`cli`] - the `promptctl` command-line interface
//! - [`config`] - global configuration (`~/.promptctl/config.toml`)
//! - [`core`] - error types and user-facing error display
//!
//! # Example
//!
//! ```rust,no_run
//! use promptctl_cli::controls::{parse, render, ValueMap};
//!
//! let text = "Write a {{select:Genre:Fantasy|Sci-Fi}} story about {{text:Hero:a knight}}.";
//! let declarations = parse(text);
//!
//! let mut values = ValueMap::new();
//! values.insert("Hero", "a robot");
//! assert_eq!(
//!     render(text, &declarations, &values),
//!     "Write a Fantasy story about a robot."
//! );
//! ```

pub mod cli;
pub mod config;
pub mod controls;
pub mod core;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
