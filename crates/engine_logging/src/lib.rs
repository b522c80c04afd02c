#![deny(missing_docs)]
//! Shared logging utilities for the shortener workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a helper for keeping long URLs readable in log lines, and a minimal test
//! initializer for the global logger.

/// Longest URL fragment written to a single log line.
pub const LOG_URL_MAX_CHARS: usize = 96;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens a URL for logging, keeping the head and marking the cut with `...`.
///
/// Long URLs are the whole point of this tool, so they are clipped rather than
/// written to the log verbatim.
pub fn clip_url(url: &str) -> String {
    if url.chars().count() <= LOG_URL_MAX_CHARS {
        return url.to_string();
    }
    let head: String = url.chars().take(LOG_URL_MAX_CHARS).collect();
    format!("{head}...")
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}
