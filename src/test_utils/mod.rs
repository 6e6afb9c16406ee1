//! Test utilities for ideadeps
//!
//! Helpers shared by unit tests:
//! - [`init_test_logging`] to see `tracing` output while debugging a test
//! - [`CountingExtractor`], an in-memory extractor that records every call
//! - [`DescriptorFixture`] for writing sample `ideadeps.toml` files
//! - [`publish_artifact`] for laying out a Maven repository in a temp directory

pub mod extractor;
pub mod fixtures;

pub use extractor::CountingExtractor;
pub use fixtures::{DescriptorFixture, publish_artifact};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging stays off.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// ideadeps_cli::test_utils::init_test_logging(Some(Level::DEBUG));
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
            .with_ansi(true)
            .try_init();
    });
}
