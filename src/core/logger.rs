//! The backend capability contract and the engine shared by all backends

use super::{
    context::Context,
    entry::{EntryOption, LogEntry, ResolvedEntry, MESSAGE_FIELD},
    error::{panic_message, report, LoggerError, Result},
    fields::{CommonFields, FieldValue, Fields},
    hook::{Hook, Record},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    settings::{LogSetting, LoggerType, FATAL_EXIT_CODE},
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOGGER_ID: AtomicU64 = AtomicU64::new(1);

/// The contract every logging backend satisfies.
///
/// No method reports an error to the caller: conversion, hook and sink
/// failures are absorbed, counted in [`metrics`](Logger::metrics) and written
/// to stderr. Logging never fails a request.
///
/// # Example
///
/// ```
/// use structured_logger::prelude::*;
///
/// let logger = new_logger(LoggerType::ZeroLog, [with_level(LogLevel::Debug)]);
/// logger.register_common_field("rid", "1234".into());
///
/// let ctx = logger.with_context(&Context::background());
/// let same = from_context(&ctx, LoggerType::ZeroLog);
/// assert_eq!(same.id(), logger.id());
/// ```
pub trait Logger: Send + Sync {
    /// The backend behind this instance
    fn kind(&self) -> LoggerType;

    /// Identity of the underlying instance; aliases share it
    fn id(&self) -> u64;

    /// Derive a context that carries this instance under its backend key
    fn with_context(&self, ctx: &Context) -> Context;

    /// Add one persistent field; an existing key is overwritten
    fn register_common_field(&self, key: &str, value: FieldValue);

    /// Add every field of `entry` persistently; existing keys are overwritten
    fn register_common_fields(&self, entry: &dyn LogEntry);

    /// Snapshot of the persistent fields
    fn common_fields(&self) -> Fields;

    /// Resolve options into the field set of one record.
    ///
    /// The result is a transient copy; the persistent fields are unchanged.
    fn apply_options(&self, options: &[EntryOption<'_>]) -> Fields;

    /// Install a hook if it matches this backend; other hooks are ignored
    fn add_hook(&self, hook: Hook);

    /// Emit one record at `level`
    fn log(&self, level: LogLevel, options: &[EntryOption<'_>]);

    fn flush(&self);

    fn metrics(&self) -> &LoggerMetrics;

    fn debug(&self, options: &[EntryOption<'_>]) {
        self.log(LogLevel::Debug, options)
    }

    fn info(&self, options: &[EntryOption<'_>]) {
        self.log(LogLevel::Info, options)
    }

    fn warn(&self, options: &[EntryOption<'_>]) {
        self.log(LogLevel::Warn, options)
    }

    fn error(&self, options: &[EntryOption<'_>]) {
        self.log(LogLevel::Error, options)
    }

    /// Emit, flush, then hand control to the configured exit handler
    fn fatal(&self, options: &[EntryOption<'_>]) {
        self.log(LogLevel::Fatal, options)
    }
}

/// State and emission pipeline shared by the concrete backends
///
/// A backend owns one `LoggerCore` behind an `Arc`, so every clone of the
/// backend handle sees the same settings, sink, fields and metrics.
#[derive(Debug)]
pub struct LoggerCore {
    id: u64,
    setting: LogSetting,
    common: CommonFields,
    metrics: LoggerMetrics,
}

impl LoggerCore {
    pub fn new(setting: LogSetting) -> Self {
        Self {
            id: NEXT_LOGGER_ID.fetch_add(1, Ordering::Relaxed),
            setting,
            common: CommonFields::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn setting(&self) -> &LogSetting {
        &self.setting
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn register_field(&self, key: &str, value: FieldValue) {
        self.common.set(key, value);
    }

    pub fn register_fields(&self, entry: &dyn LogEntry) {
        self.common.extend(self.convert(entry));
    }

    /// Run `to_fields`, degrading any failure to an empty contribution
    pub fn convert(&self, entry: &dyn LogEntry) -> Fields {
        let outcome = catch_unwind(AssertUnwindSafe(|| entry.to_fields()))
            .unwrap_or_else(|payload| {
                Err(LoggerError::conversion(
                    "log entry",
                    format!("to_fields panicked: {}", panic_message(payload.as_ref())),
                ))
            });

        match outcome {
            Ok(fields) => fields,
            Err(e) => {
                self.metrics.record_conversion_failure();
                report("field conversion", &e);
                Fields::new()
            }
        }
    }

    /// Common fields overlaid with the call's fields and message
    pub fn resolve(&self, options: &[EntryOption<'_>]) -> Fields {
        let entry = ResolvedEntry::resolve(options);
        let mut fields = self.common.snapshot();

        if let Some(extra) = entry.fields {
            fields.extend(self.convert(extra));
        }
        if let Some(message) = entry.message() {
            fields.insert(MESSAGE_FIELD.to_string(), FieldValue::from(message));
        }
        fields
    }

    /// Run the full pipeline for one call.
    ///
    /// `hooks` may modify the record before `render` turns it into a line.
    /// A fatal call always ends in [`LoggerCore::terminate`], even when
    /// rendering or writing failed.
    pub fn emit<H, R>(&self, level: LogLevel, options: &[EntryOption<'_>], hooks: H, render: R)
    where
        H: FnOnce(&mut Record),
        R: FnOnce(&Record) -> Result<String>,
    {
        if level.enabled_at(self.setting.level) {
            let mut record = Record::new(level, self.resolve(options));
            hooks(&mut record);
            match render(&record).and_then(|line| self.setting.output.write_line(&line)) {
                Ok(()) => {
                    self.metrics.record_emitted();
                }
                Err(e) => {
                    self.metrics.record_write_failure();
                    report("record dropped", &e);
                }
            }
        } else {
            self.metrics.record_suppressed();
        }

        if level == LogLevel::Fatal {
            self.terminate();
        }
    }

    pub fn flush(&self) {
        if let Err(e) = self.setting.output.flush() {
            report("flush", &e);
        }
    }

    /// Flush the sink and invoke the exit handler
    pub fn terminate(&self) {
        self.flush();
        (self.setting.exit_handler)(FATAL_EXIT_CODE);
    }
}
