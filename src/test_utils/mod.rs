//! Test utilities for agentdocs.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! - [`init_test_logging`] turns on `tracing` output inside tests.
//! - [`ZipFixture`] builds GitHub-style source archives in memory.
//! - [`fixtures`] holds sample `Gemfile.lock` contents.

pub mod fixtures;

pub use fixtures::{ZipFixture, gemfile_lock_git, gemfile_lock_resolved};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off.
///
/// ```bash
/// RUST_LOG=fetch=debug cargo test
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
