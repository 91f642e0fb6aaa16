//! Test logging for matcher suites
//!
//! Matchers emit `tracing` events while probing. With no subscriber installed
//! those events are forwarded to `log`, so `env_logger` is enough to see them
//! with `RUST_LOG=reinhardt_storage_matchers=trace`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// Safe to call from every test; only the first call installs the logger.
///
/// # Examples
///
/// ```
/// use reinhardt_storage_matchers::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}
