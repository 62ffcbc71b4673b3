//! Stderr logging for the binary.
//!
//! Library crates never print; the runner reports through these helpers with a
//! `[Tag] message` prefix. Per-turn detail goes through [`vlog!`](crate::vlog) and only
//! shows up with `--verbose`.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide verbose switch
pub static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

pub fn disable_verbose_logging() {
    VERBOSE_LOGGING.store(false, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// Format one log line as `[tag] message`.
pub fn format_line(tag: &str, message: &str) -> String {
    format!("[{}] {}", tag, message)
}

/// Always-on log line to stderr
#[macro_export]
macro_rules! log {
    ($tag:expr, $($arg:tt)*) => {
        eprintln!("{}", $crate::logging::format_line($tag, &format!($($arg)*)))
    };
}

/// Verbose-only log line to stderr
#[macro_export]
macro_rules! vlog {
    ($tag:expr, $($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            $crate::log!($tag, $($arg)*);
        }
    };
}
