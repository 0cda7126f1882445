//! Logger construction and retrieval from a context
//!
//! ```
//! use structured_logger::prelude::*;
//!
//! // request handler: create a logger and bind it
//! let log = new_logger(LoggerType::ZeroLog, [with_level(LogLevel::Debug)]);
//! log.register_common_field("rid", "1234".into());
//! let ctx = log.with_context(&Context::background());
//!
//! // deeper in the call graph
//! fn do_something(ctx: &Context) {
//!     let log = from_context(ctx, LoggerType::ZeroLog);
//!     log.debug(&[with_message("working")]);
//! }
//! do_something(&ctx);
//! ```

use crate::backends::{LogrusLogger, NopLogger, ZerologLogger};
use crate::core::{
    report, Context, LogContextKey, LogSetting, Logger, LoggerConfig, LoggerType, SettingOption,
};
use std::sync::Arc;

/// Shared handle returned by the factory
pub type SharedLogger = Arc<dyn Logger>;

/// Build a logger of `kind` from the defaults overlaid with `options`.
///
/// Defaults: level `Info`, standard output, `%Y-%m-%d %H:%M:%S`, JSON.
/// The reserved `Zap` type yields a no-op logger.
pub fn new_logger<I>(kind: LoggerType, options: I) -> SharedLogger
where
    I: IntoIterator<Item = SettingOption>,
{
    let setting = LogSetting::from_options(options);
    match kind {
        LoggerType::Logrus => Arc::new(LogrusLogger::new(setting)),
        LoggerType::ZeroLog => Arc::new(ZerologLogger::new(setting)),
        LoggerType::Zap => Arc::new(NopLogger),
    }
}

/// Build a logger from a type name; unknown names yield a no-op logger.
///
/// The no-op logger reports [`LoggerType::Zap`] from `kind()` whatever the
/// name was.
pub fn new_logger_by_name<I>(name: &str, options: I) -> SharedLogger
where
    I: IntoIterator<Item = SettingOption>,
{
    match name.parse::<LoggerType>() {
        Ok(kind) => new_logger(kind, options),
        Err(_) => Arc::new(NopLogger),
    }
}

/// Build a logger from a deserialized configuration plus extra options.
///
/// `extra` is applied after the configuration, so it can supply what a
/// config file cannot express, such as the output sink.
pub fn new_logger_from_config<I>(config: LoggerConfig, extra: I) -> SharedLogger
where
    I: IntoIterator<Item = SettingOption>,
{
    if let Err(e) = config.validate() {
        report("logger config", &e);
    }
    let kind = config.logger_type;
    new_logger(kind, config.into_options().into_iter().chain(extra))
}

/// Recover the logger bound in `ctx` for `kind`.
///
/// Falls back to a fresh default logger (with no common fields) when nothing
/// usable is bound, and to the no-op logger for the reserved `Zap` type.
pub fn from_context(ctx: &Context, kind: LoggerType) -> SharedLogger {
    match LogContextKey::for_logger_type(kind) {
        Some(key) => ctx
            .logger(key)
            .unwrap_or_else(|| new_logger(kind, std::iter::empty())),
        None => Arc::new(NopLogger),
    }
}
