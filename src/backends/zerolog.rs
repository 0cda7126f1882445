//! Zerolog-style backend
//!
//! JSON output carries `level` and `time` next to the record fields; the
//! backend's own metadata wins over a user field of the same name. Text
//! output is a console line:
//!
//! ```text
//! 2025-01-08 10:30:45 INF request done elapsed=1000 rid=1234
//! ```

use crate::core::error::panic_message;
use crate::core::{
    format_fields, report, Context, EntryOption, FieldValue, Fields, Hook, LogContextKey,
    LogEntry, LogFormat, LogLevel, LogSetting, Logger, LoggerCore, LoggerError, LoggerMetrics,
    LoggerType, Record, Result, ZerologHook, MESSAGE_FIELD,
};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

struct Inner {
    core: LoggerCore,
    hooks: RwLock<Vec<Arc<dyn ZerologHook>>>,
}

/// Handle to a zerolog-style logger; clones share one instance
#[derive(Clone)]
pub struct ZerologLogger {
    inner: Arc<Inner>,
}

impl ZerologLogger {
    pub fn new(setting: LogSetting) -> Self {
        Self {
            inner: Arc::new(Inner {
                core: LoggerCore::new(setting),
                hooks: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Zerolog level names
    pub fn level_name(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Three-letter console abbreviations
    pub fn level_abbrev(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Fatal => "FTL",
        }
    }

    fn run_hooks(&self, record: &mut Record) {
        let hooks = self.inner.hooks.read().clone();
        for hook in hooks.iter() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| hook.run(record))) {
                self.inner.core.metrics().record_hook_failure();
                report(
                    "hook panicked",
                    &LoggerError::hook("zerolog-hook", panic_message(payload.as_ref())),
                );
            }
        }
    }

    fn render(&self, record: &Record) -> Result<String> {
        let setting = self.inner.core.setting();
        match setting.format {
            LogFormat::Json => Self::render_json(record, setting),
            LogFormat::Text => Ok(Self::render_console(record, setting)),
        }
    }

    fn render_json(record: &Record, setting: &LogSetting) -> Result<String> {
        let mut object: serde_json::Map<String, serde_json::Value> = record
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();
        object.insert(
            "level".to_string(),
            serde_json::Value::String(Self::level_name(record.level).to_string()),
        );
        object.insert(
            "time".to_string(),
            setting.time_format.to_json_value(&record.time),
        );

        Ok(serde_json::to_string(&serde_json::Value::Object(object))?)
    }

    fn render_console(record: &Record, setting: &LogSetting) -> String {
        let mut fields = record.fields.clone();
        let message = fields.remove(MESSAGE_FIELD);

        let mut out = format!(
            "{} {}",
            setting.time_format.format(&record.time),
            colorize(record.level, setting.color),
        );
        if let Some(message) = message {
            out.push(' ');
            out.push_str(&message.to_string());
        }
        if !fields.is_empty() {
            out.push(' ');
            out.push_str(&format_fields(&fields));
        }
        out
    }
}

#[cfg(feature = "console")]
fn colorize(level: LogLevel, enabled: bool) -> String {
    use colored::Colorize;
    let abbrev = ZerologLogger::level_abbrev(level);
    if enabled {
        abbrev.color(level.color_code()).bold().to_string()
    } else {
        abbrev.to_string()
    }
}

#[cfg(not(feature = "console"))]
fn colorize(level: LogLevel, _enabled: bool) -> String {
    ZerologLogger::level_abbrev(level).to_string()
}

impl Logger for ZerologLogger {
    fn kind(&self) -> LoggerType {
        LoggerType::ZeroLog
    }

    fn id(&self) -> u64 {
        self.inner.core.id()
    }

    fn with_context(&self, ctx: &Context) -> Context {
        ctx.with_logger(LogContextKey::Zerolog, Arc::new(self.clone()))
    }

    fn register_common_field(&self, key: &str, value: FieldValue) {
        self.inner.core.register_field(key, value);
    }

    fn register_common_fields(&self, entry: &dyn LogEntry) {
        self.inner.core.register_fields(entry);
    }

    fn common_fields(&self) -> Fields {
        self.inner.core.common().snapshot()
    }

    fn apply_options(&self, options: &[EntryOption<'_>]) -> Fields {
        self.inner.core.resolve(options)
    }

    fn add_hook(&self, hook: Hook) {
        if let Hook::Zerolog(hook) = hook {
            self.inner.hooks.write().push(hook);
        }
    }

    fn log(&self, level: LogLevel, options: &[EntryOption<'_>]) {
        self.inner.core.emit(
            level,
            options,
            |record| self.run_hooks(record),
            |record| self.render(record),
        );
    }

    fn flush(&self) {
        self.inner.core.flush();
    }

    fn metrics(&self) -> &LoggerMetrics {
        self.inner.core.metrics()
    }
}
