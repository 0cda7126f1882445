//! Logger that discards everything
//!
//! Returned for reserved or unknown backend types so call sites never need
//! to handle a construction failure.

use crate::core::{
    Context, EntryOption, FieldValue, Fields, Hook, LogEntry, LogLevel, Logger, LoggerMetrics,
    LoggerType,
};

static NOP_METRICS: LoggerMetrics = LoggerMetrics::new();

/// Silent logger behind every unsupported backend
///
/// [`kind`](Logger::kind) always reports [`LoggerType::Zap`], the reserved
/// type, including when the logger was produced for an unrecognized name.
/// Use [`id`](Logger::id), which is always `0`, to tell it apart from a real
/// backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn kind(&self) -> LoggerType {
        LoggerType::Zap
    }

    fn id(&self) -> u64 {
        0
    }

    fn with_context(&self, ctx: &Context) -> Context {
        ctx.clone()
    }

    fn register_common_field(&self, _key: &str, _value: FieldValue) {}

    fn register_common_fields(&self, _entry: &dyn LogEntry) {}

    fn common_fields(&self) -> Fields {
        Fields::new()
    }

    fn apply_options(&self, _options: &[EntryOption<'_>]) -> Fields {
        Fields::new()
    }

    fn add_hook(&self, _hook: Hook) {}

    fn log(&self, _level: LogLevel, _options: &[EntryOption<'_>]) {}

    fn flush(&self) {}

    fn metrics(&self) -> &LoggerMetrics {
        &NOP_METRICS
    }
}
