//! # Structured Logger
//!
//! A pluggable structured logging facade: one [`Logger`] contract backed by
//! interchangeable engines, with persistent common fields, per-call entry
//! options, hooks, and retrieval of a logger from an immutable [`Context`]
//! deeper in a call graph.
//!
//! ## Features
//!
//! - **Common Fields**: register once, emitted with every record
//! - **Entry Options**: per-call message and fields, never leaking into the next call
//! - **Context Propagation**: bind a logger once, recover it anywhere below
//! - **Never Fails**: conversion, hook and sink failures degrade instead of erroring
//!
//! ## Example
//!
//! ```
//! use serde::Serialize;
//! use structured_logger::prelude::*;
//!
//! #[derive(Serialize)]
//! struct Access {
//!     uri: String,
//!     status_code: u16,
//! }
//!
//! impl LogEntry for Access {
//!     fn to_fields(&self) -> Result<Fields> {
//!         fields_from_serialize(self)
//!     }
//! }
//!
//! let capture = CaptureWriter::new();
//! let log = new_logger(LoggerType::ZeroLog, [with_output(capture.clone())]);
//! log.register_common_field("rid", "1234".into());
//!
//! let access = Access { uri: "/".into(), status_code: 200 };
//! log.info(&[with_message("served"), with_fields(&access)]);
//!
//! let record = capture.last_json().unwrap();
//! assert_eq!(record["rid"], "1234");
//! assert_eq!(record["status_code"], 200);
//! ```

pub mod backends;
pub mod core;
pub mod macros;
pub mod wrapper;

pub mod prelude {
    pub use crate::backends::{LogrusLogger, NopLogger, ZerologLogger};
    pub use crate::core::{
        fields_from_serialize, with_color, with_exit_handler, with_fields, with_format,
        with_level, with_message, with_output, with_sink, with_time_format, CaptureWriter,
        Context, EntryOption, FieldValue, Fields, Hook, LogEntry, LogFormat, LogLevel, Logger,
        LoggerConfig, LoggerError, LoggerMetrics, LoggerType, LogrusHook, Record, Result,
        SettingOption, TimestampFormat, ZerologHook,
    };
    pub use crate::wrapper::{
        from_context, new_logger, new_logger_by_name, new_logger_from_config, SharedLogger,
    };
}

pub use backends::{LogrusLogger, NopLogger, ZerologLogger};
pub use core::{
    fields_from_serialize, with_color, with_exit_handler, with_fields, with_format, with_level,
    with_message, with_output, with_sink, with_time_format, CaptureWriter, CommonFields, Context,
    ContextKey, EntryOption, FieldValue, Fields, Hook, LogContextKey, LogEntry, LogFormat,
    LogLevel, LogSetting, Logger, LoggerConfig, LoggerError, LoggerMetrics, LoggerType,
    LogrusHook, Record, ResolvedEntry, Result, SettingOption, Sink, TimestampFormat,
    ZerologHook, MESSAGE_FIELD,
};
pub use wrapper::{from_context, new_logger, new_logger_by_name, new_logger_from_config, SharedLogger};
