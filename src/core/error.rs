//! Error types for the logging facade
//!
//! None of these errors reach the caller of an emission method. They are
//! returned by parsing and configuration helpers and by
//! [`LogEntry::to_fields`](crate::core::LogEntry::to_fields), and otherwise
//! absorbed by the backends and reported on stderr.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A log entry could not be turned into fields
    #[error("Field conversion failed for {entry}: {message}")]
    Conversion { entry: String, message: String },

    /// Unknown logger type name
    #[error("Unknown logger type: '{0}'")]
    UnknownLoggerType(String),

    /// Unparseable log level
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Hook returned an error or panicked
    #[error("Hook '{hook}' failed: {message}")]
    HookFailed { hook: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a field conversion error
    pub fn conversion(entry: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Conversion {
            entry: entry.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a hook failure error
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HookFailed {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Report an absorbed failure on stderr.
///
/// The facade never logs through itself, so internal problems are written
/// directly to the process' standard error.
pub(crate) fn report(context: &str, err: &LoggerError) {
    eprintln!("[LOGGER ERROR] {}: {}", context, err);
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
