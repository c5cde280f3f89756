// system-tests/tests/helpers/logging.rs
// ============================================================================
// Module: Test Logging
// Description: One-time tracing subscriber installation for suites.
// Purpose: Surface harness diagnostics in test output, filtered by RUST_LOG.
// Dependencies: tracing-subscriber
// ============================================================================

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the fmt subscriber once per test binary.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}
