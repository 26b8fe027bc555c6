//! Test utilities for promptctl
//!
//! Shared helpers for unit and integration tests. Only compiled for tests or
//! with the `test-utils` feature.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// promptctl_cli::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A template covering every control kind, used across tests.
pub const SAMPLE_TEMPLATE: &str = "\
Write a {{select:Genre:Fantasy|Sci-Fi|Mystery}} story for {{text:Name:John}}.
Creativity: {{slider:Creativity:75}}
{{toggle:Include_Details}}Details for {{text:Name:John}} in {{text:Setting:a castle}}.
{{/toggle:Include_Details}}Done.";
