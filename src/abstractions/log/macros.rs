//! Macros for generating log messages.
//!
//! Each macro accepts an optional leading threshold, which must be an integer
//! literal followed by the format string. The threshold comparison happens in
//! the expansion, so suppressed messages never construct a `tracing` event.

#[macro_export]
macro_rules! error {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        if ($threshold as u8) <= $crate::log::verbosity() {
            $crate::log::init_logger();
            $crate::log::tracing::event!($crate::log::tracing::Level::ERROR, $fmt $($arg)*);
        }
    };
    ($($arg:tt)+) => { $crate::error!(0, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        if ($threshold as u8) <= $crate::log::verbosity() {
            $crate::log::init_logger();
            $crate::log::tracing::event!($crate::log::tracing::Level::WARN, $fmt $($arg)*);
        }
    };
    ($($arg:tt)+) => { $crate::warning!(0, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        if ($threshold as u8) <= $crate::log::verbosity() {
            $crate::log::init_logger();
            $crate::log::tracing::event!($crate::log::tracing::Level::INFO, $fmt $($arg)*);
        }
    };
    ($($arg:tt)+) => { $crate::info!(0, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        if ($threshold as u8) <= $crate::log::verbosity() {
            $crate::log::init_logger();
            $crate::log::tracing::event!($crate::log::tracing::Level::DEBUG, $fmt $($arg)*);
        }
    };
    ($($arg:tt)+) => { $crate::debug!(0, $($arg)+) };
}

#[macro_export]
macro_rules! trace {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        if ($threshold as u8) <= $crate::log::verbosity() {
            $crate::log::init_logger();
            $crate::log::tracing::event!($crate::log::tracing::Level::TRACE, $fmt $($arg)*);
        }
    };
    ($($arg:tt)+) => { $crate::trace!(0, $($arg)+) };
}


// The following makes the macros importable directly from the `log` module.
pub use {error, warning, info, debug, trace};
