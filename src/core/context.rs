//! Immutable request context used to carry logger instances down a call graph
//!
//! A [`Context`] is a persistent linked tree: deriving a child with
//! [`Context::with_value`] allocates one node pointing at its parent, so
//! parents and siblings never observe bindings made on another branch.
//! Lookups walk from the node towards the root and the nearest binding wins.

use super::logger::Logger;
use crate::backends::{LogrusLogger, ZerologLogger};
use super::settings::LoggerType;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Key under which a value is bound in a [`Context`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextKey(Cow<'static, str>);

impl ContextKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-backend namespaces for logger bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogContextKey {
    Logrus,
    Zerolog,
}

impl LogContextKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogContextKey::Logrus => "logrus-context-key",
            LogContextKey::Zerolog => "zerolog-context-key",
        }
    }

    pub fn key(&self) -> ContextKey {
        ContextKey::from_static(self.as_str())
    }

    /// Binding namespace of a backend; `None` for backends that never bind
    pub fn for_logger_type(kind: LoggerType) -> Option<Self> {
        match kind {
            LoggerType::Logrus => Some(LogContextKey::Logrus),
            LoggerType::ZeroLog => Some(LogContextKey::Zerolog),
            LoggerType::Zap => None,
        }
    }
}

impl From<LogContextKey> for ContextKey {
    fn from(key: LogContextKey) -> Self {
        key.key()
    }
}

struct Node {
    key: ContextKey,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Immutable, cheaply clonable context value
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context carrying `value` under `key`
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Context
    where
        K: Into<ContextKey>,
        V: Any + Send + Sync,
    {
        Context {
            head: Some(Arc::new(Node {
                key: key.into(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Nearest value bound under `key`, of any type
    pub fn value(&self, key: &ContextKey) -> Option<&(dyn Any + Send + Sync)> {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == *key {
                return Some(current.value.as_ref());
            }
            node = current.parent.as_deref();
        }
        None
    }

    /// Nearest value bound under `key`, if it has type `T`
    pub fn get<T: Any>(&self, key: &ContextKey) -> Option<&T> {
        self.value(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Number of bindings from this node to the root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            depth += 1;
            node = current.parent.as_deref();
        }
        depth
    }

    /// Bind a logger under a backend key
    #[must_use]
    pub fn with_logger(&self, key: LogContextKey, logger: Arc<dyn Logger>) -> Context {
        self.with_value(key, logger)
    }

    /// The logger bound under `key`, if the stored value is one.
    ///
    /// Accepts a shared `Arc<dyn Logger>` as bound by
    /// [`Logger::with_context`] as well as a backend handle stored directly
    /// with [`Context::with_value`].
    pub fn logger(&self, key: LogContextKey) -> Option<Arc<dyn Logger>> {
        let value = self.value(&key.key())?;
        if let Some(shared) = value.downcast_ref::<Arc<dyn Logger>>() {
            return Some(Arc::clone(shared));
        }
        if let Some(logger) = value.downcast_ref::<LogrusLogger>() {
            return Some(Arc::new(logger.clone()));
        }
        if let Some(logger) = value.downcast_ref::<ZerologLogger>() {
            return Some(Arc::new(logger.clone()));
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            keys.push(current.key.as_str());
            node = current.parent.as_deref();
        }
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.value(&ContextKey::new("anything")).is_none());
    }

    #[test]
    fn test_child_sees_parent_values() {
        let parent = Context::background().with_value(ContextKey::new("a"), 1_u32);
        let child = parent.with_value(ContextKey::new("b"), "two");

        assert_eq!(child.get::<u32>(&ContextKey::new("a")), Some(&1));
        assert_eq!(child.get::<&str>(&ContextKey::new("b")), Some(&"two"));
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn test_derivation_does_not_touch_parent_or_siblings() {
        let root = Context::background();
        let left = root.with_value(ContextKey::new("k"), 1_u32);
        let right = root.with_value(ContextKey::new("other"), 2_u32);

        assert!(root.value(&ContextKey::new("k")).is_none());
        assert!(right.value(&ContextKey::new("k")).is_none());
        assert_eq!(left.get::<u32>(&ContextKey::new("k")), Some(&1));
    }

    #[test]
    fn test_nearest_binding_wins() {
        let ctx = Context::background()
            .with_value(ContextKey::new("k"), 1_u32)
            .with_value(ContextKey::new("k"), 2_u32);
        assert_eq!(ctx.get::<u32>(&ContextKey::new("k")), Some(&2));
    }

    #[test]
    fn test_wrong_type_is_none() {
        let ctx = Context::background().with_value(LogContextKey::Zerolog, "not a logger");
        assert!(ctx.get::<u32>(&LogContextKey::Zerolog.key()).is_none());
        assert!(ctx.logger(LogContextKey::Zerolog).is_none());
    }

    #[test]
    fn test_backend_handle_stored_directly_is_found() {
        use crate::core::LogSetting;

        let zerolog = ZerologLogger::new(LogSetting::default());
        zerolog.register_common_field("rid", "1".into());
        let logrus = LogrusLogger::new(LogSetting::default());

        let ctx = Context::background()
            .with_value(LogContextKey::Zerolog, zerolog.clone())
            .with_value(LogContextKey::Logrus, logrus.clone());

        let found = ctx.logger(LogContextKey::Zerolog).expect("zerolog handle");
        assert_eq!(found.id(), zerolog.id());
        assert_eq!(found.common_fields()["rid"].as_str(), Some("1"));
        assert_eq!(ctx.logger(LogContextKey::Logrus).map(|l| l.id()), Some(logrus.id()));
    }

    #[test]
    fn test_backend_keys_are_distinct() {
        assert_ne!(LogContextKey::Logrus.key(), LogContextKey::Zerolog.key());
        assert_eq!(LogContextKey::Logrus.as_str(), "logrus-context-key");
    }

    #[test]
    fn test_key_for_logger_type() {
        assert_eq!(
            LogContextKey::for_logger_type(LoggerType::ZeroLog),
            Some(LogContextKey::Zerolog)
        );
        assert_eq!(LogContextKey::for_logger_type(LoggerType::Zap), None);
    }

    #[test]
    fn test_context_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}
