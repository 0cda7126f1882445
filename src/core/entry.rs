//! Entry options and the field conversion capability
//!
//! A call such as `logger.info(&[with_message("done"), with_fields(&entry)])`
//! carries an ordered list of [`EntryOption`]s. They are applied left to right
//! onto a single [`ResolvedEntry`]; a later option of the same kind replaces
//! an earlier one.

use super::error::{LoggerError, Result};
use super::fields::{FieldValue, Fields};
use serde::Serialize;
use std::fmt;

/// Reserved field name under which the message is emitted
pub const MESSAGE_FIELD: &str = "message";

/// Anything that can be turned into a set of log fields.
///
/// Implementations are responsible for masking sensitive values before
/// returning them; the logger emits the returned fields verbatim.
///
/// # Example
///
/// ```
/// use serde::Serialize;
/// use structured_logger::core::{fields_from_serialize, Fields, LogEntry, Result};
///
/// #[derive(Serialize)]
/// struct Request {
///     uri: String,
///     status_code: u16,
/// }
///
/// impl LogEntry for Request {
///     fn to_fields(&self) -> Result<Fields> {
///         fields_from_serialize(self)
///     }
/// }
///
/// let fields = Request { uri: "/".into(), status_code: 200 }.to_fields().unwrap();
/// assert_eq!(fields.len(), 2);
/// ```
pub trait LogEntry: Send + Sync {
    fn to_fields(&self) -> Result<Fields>;
}

impl LogEntry for Fields {
    fn to_fields(&self) -> Result<Fields> {
        Ok(self.clone())
    }
}

impl<T: LogEntry + ?Sized> LogEntry for &T {
    fn to_fields(&self) -> Result<Fields> {
        (**self).to_fields()
    }
}

/// Convert any serializable value into fields.
///
/// The value must serialize to a JSON object; anything else is a conversion
/// error.
pub fn fields_from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, FieldValue::from(v)))
            .collect()),
        other => Err(LoggerError::conversion(
            std::any::type_name::<T>(),
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// A per-call modifier applied to the next emitted record only
#[derive(Clone, Copy)]
pub enum EntryOption<'a> {
    Message(&'a str),
    Fields(&'a dyn LogEntry),
}

impl<'a> EntryOption<'a> {
    pub fn apply(&self, entry: &mut ResolvedEntry<'a>) {
        match *self {
            EntryOption::Message(message) => entry.message = Some(message),
            EntryOption::Fields(fields) => entry.fields = Some(fields),
        }
    }
}

impl fmt::Debug for EntryOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryOption::Message(m) => f.debug_tuple("Message").field(m).finish(),
            EntryOption::Fields(_) => f.debug_tuple("Fields").field(&"..").finish(),
        }
    }
}

/// Set the record message
pub fn with_message(message: &str) -> EntryOption<'_> {
    EntryOption::Message(message)
}

/// Attach the fields of `entry` to the record
pub fn with_fields(entry: &dyn LogEntry) -> EntryOption<'_> {
    EntryOption::Fields(entry)
}

/// The result of applying a list of options
#[derive(Default, Clone, Copy)]
pub struct ResolvedEntry<'a> {
    pub message: Option<&'a str>,
    pub fields: Option<&'a dyn LogEntry>,
}

impl<'a> ResolvedEntry<'a> {
    pub fn resolve(options: &[EntryOption<'a>]) -> Self {
        let mut entry = ResolvedEntry::default();
        for option in options {
            option.apply(&mut entry);
        }
        entry
    }

    /// Message to inject; an empty string counts as no message
    pub fn message(&self) -> Option<&'a str> {
        self.message.filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        elapsed: i64,
        uri: &'static str,
    }

    impl LogEntry for Sample {
        fn to_fields(&self) -> Result<Fields> {
            fields_from_serialize(self)
        }
    }

    #[test]
    fn test_no_options() {
        let entry = ResolvedEntry::resolve(&[]);
        assert!(entry.message().is_none());
        assert!(entry.fields.is_none());
    }

    #[test]
    fn test_last_message_wins() {
        let entry = ResolvedEntry::resolve(&[with_message("first"), with_message("second")]);
        assert_eq!(entry.message(), Some("second"));
    }

    #[test]
    fn test_last_fields_win() {
        let a = Sample { elapsed: 1, uri: "/a" };
        let b = Sample { elapsed: 2, uri: "/b" };
        let entry = ResolvedEntry::resolve(&[with_fields(&a), with_fields(&b)]);

        let fields = entry.fields.unwrap().to_fields().unwrap();
        assert_eq!(fields["uri"].as_str(), Some("/b"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_empty_message_is_absent() {
        let entry = ResolvedEntry::resolve(&[with_message("")]);
        assert!(entry.message().is_none());
    }

    #[test]
    fn test_fields_from_serialize_rejects_non_objects() {
        let err = fields_from_serialize(&42).unwrap_err();
        assert!(matches!(err, LoggerError::Conversion { .. }));
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn test_fields_map_is_entry() {
        let mut fields = Fields::new();
        fields.insert("k".into(), "v".into());
        assert_eq!(fields.to_fields().unwrap(), fields);
    }
}
