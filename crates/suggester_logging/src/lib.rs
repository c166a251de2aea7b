#![deny(missing_docs)]
//! Logging utilities shared by the suggester workspace.
//!
//! Exposes the `suggester_*` macros used across the crates, the animation
//! frame counter that the host loop stamps once per tick, and a terminal
//! logger initializer for tests.

use std::cell::Cell;

thread_local! {
    /// Animation frame currently being processed on this thread.
    static FRAME: Cell<u64> = const { Cell::new(0) };
}

/// Records the animation frame for the current thread.
/// The host event loop calls this once per tick.
pub fn set_frame(frame: u64) {
    FRAME.with(|v| v.set(frame));
}

/// Returns the animation frame recorded for the current thread, or 0 before
/// the first tick.
pub fn current_frame() -> u64 {
    FRAME.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current animation frame.
#[macro_export]
macro_rules! suggester_trace {
    ($($arg:tt)*) => {{
        log::trace!("[f{}] {}", $crate::current_frame(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message through the global logging facade.
#[macro_export]
macro_rules! suggester_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message through the global logging facade.
#[macro_export]
macro_rules! suggester_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message through the global logging facade.
#[macro_export]
macro_rules! suggester_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
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
    use super::{current_frame, set_frame};

    #[test]
    fn frame_counter_is_per_thread() {
        set_frame(17);
        assert_eq!(current_frame(), 17);

        let other = std::thread::spawn(current_frame).join().unwrap();
        assert_eq!(other, 0);
    }
}
