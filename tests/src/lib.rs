//! Shared helpers for the workspace integration tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logger for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

/// Compare two results, treating NaN as equal to NaN
pub fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}
