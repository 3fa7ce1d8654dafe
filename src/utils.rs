// Diagnostics helpers

use std::sync::OnceLock;

/// Environment variable that turns on pipeline diagnostics on stderr.
pub const DEBUG_ENV: &str = "LINE_TRACKER_DEBUG";

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| debug_flag(std::env::var(DEBUG_ENV).ok().as_deref()))
}

fn debug_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// Print a diagnostic line to stderr when `LINE_TRACKER_DEBUG=1`.
///
/// The variable is read once per process.
pub fn debug_log(msg: &str) {
    if is_debug_enabled() {
        eprintln!("[line-tracker] {}", msg);
    }
}
