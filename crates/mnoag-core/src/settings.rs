use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// Process-wide switch that makes otherwise random output reproducible.
static TEST_MODE: AtomicBool = AtomicBool::new(false);

pub fn enable_test_mode() {
    TEST_MODE.store(true, Ordering::SeqCst);
}

pub fn disable_test_mode() {
    TEST_MODE.store(false, Ordering::SeqCst);
}

pub fn is_test_mode() -> bool {
    TEST_MODE.load(Ordering::SeqCst)
}

/// Enables test mode for as long as the guard lives.
#[must_use = "test mode is disabled again when the guard is dropped"]
pub struct TestModeGuard {
    previous: bool,
}

impl TestModeGuard {
    pub fn new() -> Self {
        let previous = TEST_MODE.swap(true, Ordering::SeqCst);
        Self { previous }
    }
}

impl Default for TestModeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestModeGuard {
    fn drop(&mut self) {
        TEST_MODE.store(self.previous, Ordering::SeqCst);
    }
}

/// Settings scoped to a single lowering run. Seeded from the normalizer
/// switches and reset at the start of every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    pub divide_operations_by_content_type: bool,
}

impl GlobalSettings {
    pub const DIVIDE_OPERATIONS_BY_CONTENT_TYPE: &'static str = "DIVIDE_OPERATIONS_BY_CONTENT_TYPE";

    pub fn from_switches<'a>(switches: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut settings = Self::default();
        for (key, value) in switches {
            if key == Self::DIVIDE_OPERATIONS_BY_CONTENT_TYPE {
                settings.divide_operations_by_content_type = value.eq_ignore_ascii_case("true");
            }
        }
        settings
    }
}

/// Next model serial id: random, or a stable sequence in test mode.
pub fn next_serial_id(counter: &mut i64) -> i64 {
    if is_test_mode() {
        *counter += 1;
        return *counter;
    }
    rand::random::<i64>()
}
