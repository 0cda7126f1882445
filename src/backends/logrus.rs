//! Logrus-style backend
//!
//! JSON output is one object per line with `level` and `time` added; user
//! fields that collide with those keys are kept under `fields.level` and
//! `fields.time`, unless the record already carries that literal key. Text
//! output is logfmt:
//!
//! ```text
//! time="2025-01-08 10:30:45" level=info message="request done" rid=1234
//! ```

use crate::core::{
    format_fields_with, report, Context, EntryOption, FieldValue, Fields, Hook, LogContextKey,
    LogEntry, LogFormat, LogLevel, LogSetting, Logger, LoggerCore, LoggerError, LoggerMetrics,
    LoggerType, LogrusHook, Record, Result,
};
use crate::core::error::panic_message;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

const LEVEL_KEY: &str = "level";
const TIME_KEY: &str = "time";

struct Inner {
    core: LoggerCore,
    hooks: RwLock<Vec<Arc<dyn LogrusHook>>>,
}

/// Handle to a logrus-style logger; clones share one instance
#[derive(Clone)]
pub struct LogrusLogger {
    inner: Arc<Inner>,
}

impl LogrusLogger {
    pub fn new(setting: LogSetting) -> Self {
        Self {
            inner: Arc::new(Inner {
                core: LoggerCore::new(setting),
                hooks: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Logrus level names
    pub fn level_name(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    fn fire_hooks(&self, record: &mut Record) {
        let hooks = self.inner.hooks.read().clone();
        let level = record.level;
        for hook in hooks.iter().filter(|h| h.levels().contains(&level)) {
            let outcome = catch_unwind(AssertUnwindSafe(|| hook.fire(record)))
                .unwrap_or_else(|payload| Err(LoggerError::other(panic_message(payload.as_ref()))));

            if let Err(e) = outcome {
                self.inner.core.metrics().record_hook_failure();
                report(
                    "Failed to fire hook",
                    &LoggerError::hook(hook.name(), e.to_string()),
                );
            }
        }
    }

    fn render(&self, record: &Record) -> Result<String> {
        let setting = self.inner.core.setting();
        match setting.format {
            LogFormat::Json => Self::render_json(record, setting),
            LogFormat::Text => Ok(Self::render_text(record, setting)),
        }
    }

    fn render_json(record: &Record, setting: &LogSetting) -> Result<String> {
        let mut object = serde_json::Map::new();
        for (key, value) in record.fields.iter().filter(|(k, _)| is_reserved(k)) {
            object.insert(format!("fields.{}", key), value.to_json_value());
        }
        // literal `fields.*` keys overwrite the renamed clashes
        for (key, value) in record.fields.iter().filter(|(k, _)| !is_reserved(k)) {
            object.insert(key.clone(), value.to_json_value());
        }
        object.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(Self::level_name(record.level).to_string()),
        );
        object.insert(
            TIME_KEY.to_string(),
            setting.time_format.to_json_value(&record.time),
        );

        Ok(serde_json::to_string(&serde_json::Value::Object(object))?)
    }

    fn render_text(record: &Record, setting: &LogSetting) -> String {
        let mut fields = record.fields.clone();
        let time = fields.remove(TIME_KEY);
        let level = fields.remove(LEVEL_KEY);

        let mut out = format!(
            "time={} level={}",
            quote_if_needed(&setting.time_format.format(&record.time)),
            colorize(Self::level_name(record.level), record.level, setting.color),
        );
        if let Some(time) = time {
            fields.entry("fields.time".to_string()).or_insert(time);
        }
        if let Some(level) = level {
            fields.entry("fields.level".to_string()).or_insert(level);
        }
        if !fields.is_empty() {
            out.push(' ');
            out.push_str(&format_fields_with(&fields, |v| quote_if_needed(&v.to_string())));
        }
        out
    }
}

fn is_reserved(key: &str) -> bool {
    key == LEVEL_KEY || key == TIME_KEY
}

/// Quote a logfmt value unless it only holds safe characters
fn quote_if_needed(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-._/@^+".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("{:?}", value)
    }
}

#[cfg(feature = "console")]
fn colorize(name: &str, level: LogLevel, enabled: bool) -> String {
    use colored::Colorize;
    if enabled {
        name.color(level.color_code()).to_string()
    } else {
        name.to_string()
    }
}

#[cfg(not(feature = "console"))]
fn colorize(name: &str, _level: LogLevel, _enabled: bool) -> String {
    name.to_string()
}

impl Logger for LogrusLogger {
    fn kind(&self) -> LoggerType {
        LoggerType::Logrus
    }

    fn id(&self) -> u64 {
        self.inner.core.id()
    }

    fn with_context(&self, ctx: &Context) -> Context {
        ctx.with_logger(LogContextKey::Logrus, Arc::new(self.clone()))
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
        if let Hook::Logrus(hook) = hook {
            self.inner.hooks.write().push(hook);
        }
    }

    fn log(&self, level: LogLevel, options: &[EntryOption<'_>]) {
        self.inner.core.emit(
            level,
            options,
            |record| self.fire_hooks(record),
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
