//! Process-wide tracing setup for services embedding the basket controllers.

/// Installs the JSON subscriber with the `RUST_LOG` filter (default `info`).
///
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
    tracing::init(DEFAULT_DIRECTIVE);
}

/// Human-readable output captured by the test harness.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Subscriber construction.
pub mod tracing;
