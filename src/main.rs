//! promptctl CLI entry point
//!
//! Parses command-line arguments, runs the selected command and prints
//! failures as user-friendly errors with suggestions.
//!
//! Commands:
//! - `parse` - List the control declarations of a template
//! - `render` - Render a template with control values
//! - `controls` - List distinct controls across templates
//! - `check` - Report directives that will not behave as written
//! - `config` - Manage global configuration

use anyhow::Result;
use clap::Parser;
use promptctl_cli::cli;
use promptctl_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
