//! Timestamp formatting utilities
//!
//! Backends stamp every record with the local emission time, rendered with
//! the configured [`TimestampFormat`].

use super::error::{report, LoggerError};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

static INVALID_PATTERN_REPORTED: AtomicBool = AtomicBool::new(false);

/// Default strftime pattern: `2025-01-08 10:30:45`
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use structured_logger::core::TimestampFormat;
///
/// let format = TimestampFormat::default();
/// let stamp = format.format(&chrono::Local::now());
/// assert_eq!(stamp.len(), "2025-01-08 10:30:45".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45`
    #[default]
    DateTime,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+09:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use structured_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// assert!(!format.is_numeric());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::DateTime => datetime.format(DEFAULT_TIME_FORMAT).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                use std::fmt::Write;
                // chrono reports bad specifiers through fmt::Error rather than a Result
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => {
                        if !INVALID_PATTERN_REPORTED.swap(true, Ordering::Relaxed) {
                            report(
                                "timestamp",
                                &LoggerError::config(
                                    "time_format",
                                    format!(
                                        "invalid pattern {:?}, falling back to {:?}",
                                        format_str, DEFAULT_TIME_FORMAT
                                    ),
                                ),
                            );
                        }
                        datetime.format(DEFAULT_TIME_FORMAT).to_string()
                    }
                }
            }
        }
    }

    /// Render the timestamp as a JSON value; numeric formats stay numbers
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Local>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => datetime.timestamp().into(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().into(),
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }

    /// Whether a custom pattern only uses specifiers chrono understands
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(pattern) => {
                !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

impl From<&str> for TimestampFormat {
    fn from(format_str: &str) -> Self {
        if format_str == DEFAULT_TIME_FORMAT {
            TimestampFormat::DateTime
        } else {
            TimestampFormat::Custom(format_str.to_string())
        }
    }
}

impl From<String> for TimestampFormat {
    fn from(format_str: String) -> Self {
        TimestampFormat::from(format_str.as_str())
    }
}
