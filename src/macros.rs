//! Logging macros for formatted messages.
//!
//! Each macro formats its arguments like `format!` and emits the result as
//! the record message. Per-call fields go first, after `fields =` and
//! terminated by `;`.
//!
//! # Examples
//!
//! ```
//! use structured_logger::prelude::*;
//! use structured_logger::{info, warn};
//!
//! let logger = new_logger(LoggerType::ZeroLog, [with_output(CaptureWriter::new())]);
//!
//! info!(logger, "Server listening on port {}", 8080);
//!
//! let mut extra = Fields::new();
//! extra.insert("retry".into(), 3.into());
//! warn!(logger, fields = &extra; "upstream slow: {}ms", 1200);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use structured_logger::prelude::*;
/// # let logger = new_logger(LoggerType::Logrus, [with_output(CaptureWriter::new())]);
/// use structured_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, fields = $fields:expr; $($arg:tt)+) => {
        $logger.log(
            $level,
            &[
                $crate::core::with_fields($fields),
                $crate::core::with_message(&format!($($arg)+)),
            ],
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, &[$crate::core::with_message(&format!($($arg)+))])
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then run the logger's exit handler.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
