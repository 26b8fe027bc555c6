//! Configuration management for promptctl
//!
//! promptctl has a single configuration layer: the user-wide global
//! configuration file holding default control values. See [`GlobalConfig`]
//! for its location and format.
//!
//! # Value Precedence
//!
//! When rendering, values are layered from lowest to highest precedence:
//!
//! 1. **Global values** from `~/.promptctl/config.toml` (skipped with `--no-global`)
//! 2. **Values file** passed with `render --values`
//! 3. **Command-line assignments** (`--set`, `--enable`, `--disable`)
//!
//! Controls without any value fall back to the default declared in the
//! template itself.

pub mod global;

pub use global::GlobalConfig;
