#![deny(missing_docs)]
//! Shared logging utilities for the folio workspace.
//!
//! The `folio_*` macros forward to the `log` facade so library crates never
//! pick a backend. The binary installs `simplelog`; tests use
//! [`initialize_for_tests`].

use std::cell::Cell;

thread_local! {
    /// Animation frame counter of the page shell running on this thread.
    static FRAME: Cell<u64> = const { Cell::new(0) };
}

/// Records the current animation frame for the page shell on this thread.
/// The shell loop calls this once per frame so log lines can be correlated
/// with scroll animation progress.
pub fn set_frame(frame: u64) {
    FRAME.with(|v| v.set(frame));
}

/// Returns the animation frame last recorded on this thread, or 0.
pub fn frame() -> u64 {
    FRAME.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! folio_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! folio_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! folio_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! folio_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! folio_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::{frame, set_frame};

    #[test]
    fn frame_is_thread_local() {
        set_frame(7);
        assert_eq!(frame(), 7);
        let other = std::thread::spawn(frame).join().unwrap();
        assert_eq!(other, 0);
    }
}
