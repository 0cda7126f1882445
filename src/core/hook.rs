//! Emission hooks and the record they observe
//!
//! Hooks are backend specific. [`Hook`] is the closed set of hook
//! capabilities; a backend only installs the variant it understands and
//! silently ignores the rest, so the same registration code can run against
//! any backend.

use super::entry::MESSAGE_FIELD;
use super::error::Result;
use super::fields::{FieldValue, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;

/// A record about to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: LogLevel,
    pub time: DateTime<Local>,
    pub fields: Fields,
}

impl Record {
    pub fn new(level: LogLevel, fields: Fields) -> Self {
        Self {
            level,
            time: Local::now(),
            fields,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get(MESSAGE_FIELD).and_then(FieldValue::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Add or replace a field on this record only
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }
}

/// Hook for the logrus-style backend
///
/// Fired for the levels returned by [`levels`](LogrusHook::levels). An error
/// is reported on stderr and does not stop the record from being written.
pub trait LogrusHook: Send + Sync {
    fn levels(&self) -> &[LogLevel] {
        &LogLevel::ALL
    }

    fn fire(&self, record: &mut Record) -> Result<()>;

    fn name(&self) -> &str {
        "logrus-hook"
    }
}

/// Hook for the zerolog-style backend, run on every record
pub trait ZerologHook: Send + Sync {
    fn run(&self, record: &mut Record);
}

impl<F> ZerologHook for F
where
    F: Fn(&mut Record) + Send + Sync,
{
    fn run(&self, record: &mut Record) {
        self(record)
    }
}

/// A hook capability for one backend
#[derive(Clone)]
pub enum Hook {
    Logrus(Arc<dyn LogrusHook>),
    Zerolog(Arc<dyn ZerologHook>),
}

impl Hook {
    pub fn logrus<H: LogrusHook + 'static>(hook: H) -> Self {
        Hook::Logrus(Arc::new(hook))
    }

    pub fn zerolog<H: ZerologHook + 'static>(hook: H) -> Self {
        Hook::Zerolog(Arc::new(hook))
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Logrus(h) => f.debug_tuple("Logrus").field(&h.name()).finish(),
            Hook::Zerolog(_) => f.write_str("Zerolog(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_message() {
        let mut fields = Fields::new();
        fields.insert(MESSAGE_FIELD.into(), "hello".into());
        let record = Record::new(LogLevel::Info, fields);

        assert_eq!(record.message(), Some("hello"));
        assert!(record.field("missing").is_none());
    }

    #[test]
    fn test_closure_is_zerolog_hook() {
        let hook = |record: &mut Record| record.insert("hooked", true);
        let mut record = Record::new(LogLevel::Warn, Fields::new());
        hook.run(&mut record);
        assert_eq!(record.field("hooked"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_logrus_hook_default_levels() {
        struct Noop;
        impl LogrusHook for Noop {
            fn fire(&self, _record: &mut Record) -> Result<()> {
                Ok(())
            }
        }
        assert_eq!(Noop.levels().len(), 5);
        assert_eq!(format!("{:?}", Hook::logrus(Noop)), "Logrus(\"logrus-hook\")");
    }
}
