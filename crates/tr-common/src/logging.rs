//! `tracing` setup helper for embedders and integration tests.
//!
//! The core crate itself never installs a global subscriber — that
//! decision belongs to whatever binary or test harness embeds it — but
//! it provides one convenience initializer so tests and examples don't
//! each reinvent it.

use tracing::Level;

/// Install a simple env-filtered subscriber. Safe to call more than
/// once; later calls are no-ops if a global subscriber is already set.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}
