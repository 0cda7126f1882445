//! Logger settings, setting options and serde-backed configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

/// Logging engine selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerType {
    Logrus,
    /// Reserved; constructing it yields a no-op logger
    Zap,
    #[serde(rename = "zerolog")]
    ZeroLog,
}

impl LoggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerType::Logrus => "logrus",
            LoggerType::Zap => "zap",
            LoggerType::ZeroLog => "zerolog",
        }
    }
}

impl fmt::Display for LoggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerType {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "logrus" => Ok(LoggerType::Logrus),
            "zap" => Ok(LoggerType::Zap),
            "zerolog" => Ok(LoggerType::ZeroLog),
            _ => Err(LoggerError::UnknownLoggerType(s.to_string())),
        }
    }
}

/// Record layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable line; the exact layout is backend specific
    Text,
}

/// Shared output destination
///
/// Clones write to the same underlying writer; writes are serialized by an
/// internal lock so records never interleave.
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write one complete record line
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.writer
            .lock()
            .write_all(&buf)
            .map_err(|e| LoggerError::io_operation("writing record", "sink rejected record", e))
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

/// Called by `fatal` after the record has been flushed
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit code passed to the exit handler on fatal
pub const FATAL_EXIT_CODE: i32 = 1;

/// Resolved configuration of one logger instance
#[derive(Clone)]
pub struct LogSetting {
    pub level: LogLevel,
    pub output: Sink,
    pub time_format: TimestampFormat,
    pub format: LogFormat,
    /// Colorize level names in text output
    pub color: bool,
    pub exit_handler: ExitHandler,
}

impl Default for LogSetting {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: Sink::stdout(),
            time_format: TimestampFormat::default(),
            format: LogFormat::default(),
            color: false,
            exit_handler: Arc::new(|code| std::process::exit(code)),
        }
    }
}

impl fmt::Debug for LogSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSetting")
            .field("level", &self.level)
            .field("time_format", &self.time_format)
            .field("format", &self.format)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl LogSetting {
    /// Defaults overlaid with `options`, applied in order
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = SettingOption>,
    {
        let mut setting = LogSetting::default();
        for option in options {
            option.apply(&mut setting);
        }
        setting
    }
}

/// One configuration override passed to the factory
pub enum SettingOption {
    Level(LogLevel),
    Output(Sink),
    TimeFormat(TimestampFormat),
    Format(LogFormat),
    Color(bool),
    ExitHandler(ExitHandler),
}

impl SettingOption {
    pub fn apply(self, setting: &mut LogSetting) {
        match self {
            SettingOption::Level(level) => setting.level = level,
            SettingOption::Output(sink) => setting.output = sink,
            SettingOption::TimeFormat(format) => setting.time_format = format,
            SettingOption::Format(format) => setting.format = format,
            SettingOption::Color(color) => setting.color = color,
            SettingOption::ExitHandler(handler) => setting.exit_handler = handler,
        }
    }
}

impl fmt::Debug for SettingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingOption::Level(l) => f.debug_tuple("Level").field(l).finish(),
            SettingOption::Output(_) => f.write_str("Output(..)"),
            SettingOption::TimeFormat(t) => f.debug_tuple("TimeFormat").field(t).finish(),
            SettingOption::Format(fm) => f.debug_tuple("Format").field(fm).finish(),
            SettingOption::Color(c) => f.debug_tuple("Color").field(c).finish(),
            SettingOption::ExitHandler(_) => f.write_str("ExitHandler(..)"),
        }
    }
}

/// Minimum severity (default: `Info`)
pub fn with_level(level: LogLevel) -> SettingOption {
    SettingOption::Level(level)
}

/// Output destination (default: standard output)
pub fn with_output<W: Write + Send + 'static>(writer: W) -> SettingOption {
    SettingOption::Output(Sink::new(writer))
}

/// Share an existing sink between loggers
pub fn with_sink(sink: Sink) -> SettingOption {
    SettingOption::Output(sink)
}

/// Timestamp format (default: `%Y-%m-%d %H:%M:%S`)
pub fn with_time_format(format: impl Into<TimestampFormat>) -> SettingOption {
    SettingOption::TimeFormat(format.into())
}

/// Record layout (default: JSON)
pub fn with_format(format: LogFormat) -> SettingOption {
    SettingOption::Format(format)
}

/// Colorize level names in text output (default: off)
pub fn with_color(color: bool) -> SettingOption {
    SettingOption::Color(color)
}

/// Replace the process exit performed after a fatal record
pub fn with_exit_handler<F>(handler: F) -> SettingOption
where
    F: Fn(i32) + Send + Sync + 'static,
{
    SettingOption::ExitHandler(Arc::new(handler))
}

/// Serializable logger configuration
///
/// # Example
///
/// ```
/// use structured_logger::core::{LoggerConfig, LoggerType, LogLevel};
///
/// let config = LoggerConfig::from_json_str(
///     r#"{"logger_type":"zerolog","level":"debug"}"#,
/// ).unwrap();
/// assert_eq!(config.logger_type, LoggerType::ZeroLog);
/// assert_eq!(config.level, LogLevel::Debug);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub logger_type: LoggerType,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub color: bool,
}

impl LoggerConfig {
    pub fn new(logger_type: LoggerType) -> Self {
        Self {
            logger_type,
            level: LogLevel::default(),
            time_format: None,
            format: LogFormat::default(),
            color: false,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref format) = self.time_format {
            if format.trim().is_empty() {
                return Err(LoggerError::config("time_format", "must not be empty"));
            }
            if !TimestampFormat::from(format.as_str()).is_valid() {
                return Err(LoggerError::config(
                    "time_format",
                    format!("invalid strftime pattern {:?}", format),
                ));
            }
        }
        Ok(())
    }

    /// Setting options equivalent to this configuration
    pub fn into_options(self) -> Vec<SettingOption> {
        let mut options = vec![
            with_level(self.level),
            with_format(self.format),
            with_color(self.color),
        ];
        if let Some(time_format) = self.time_format {
            options.push(with_time_format(time_format));
        }
        options
    }
}
