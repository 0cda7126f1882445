//! Core types: the logger contract, entry options, fields and context

pub mod capture;
pub mod context;
pub mod entry;
pub mod error;
pub mod fields;
pub mod hook;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod settings;
pub mod timestamp;

pub use capture::CaptureWriter;
pub use context::{Context, ContextKey, LogContextKey};
pub use entry::{
    fields_from_serialize, with_fields, with_message, EntryOption, LogEntry, ResolvedEntry,
    MESSAGE_FIELD,
};
pub use error::{LoggerError, Result};
pub(crate) use error::report;
pub use fields::{format_fields, format_fields_with, CommonFields, FieldValue, Fields};
pub use hook::{Hook, LogrusHook, Record, ZerologHook};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerCore};
pub use metrics::LoggerMetrics;
pub use settings::{
    with_color, with_exit_handler, with_format, with_level, with_output, with_sink,
    with_time_format, ExitHandler, LogFormat, LogSetting, LoggerConfig, LoggerType,
    SettingOption, Sink, FATAL_EXIT_CODE,
};
pub use timestamp::{TimestampFormat, DEFAULT_TIME_FORMAT};
