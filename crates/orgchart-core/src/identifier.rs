//! Node identifiers backed by string interning.
//!
//! Org chart data arrives with ids that are sometimes numbers and sometimes
//! strings. Both are interned into a [`NodeId`], a `Copy` handle that is cheap
//! to hash and compare across layout passes.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Stable identity of a chart node.
///
/// Two `NodeId`s are equal exactly when they were created from the same
/// textual key. Numeric keys are interned through their decimal form, so
/// `NodeId::from(5_u64)` and `NodeId::new("5")` are the same id.
///
/// # Examples
///
/// ```
/// use orgchart_core::identifier::NodeId;
///
/// let ceo = NodeId::new("ceo");
/// let numeric = NodeId::from(100_u64);
///
/// assert_eq!(numeric, NodeId::new("100"));
/// assert_eq!(ceo, "ceo");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(DefaultSymbol);

impl NodeId {
    /// Creates a `NodeId` from its textual key.
    pub fn new(key: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(key)))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| {
            let key = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            write!(f, "{key}")
        })
    }
}

impl From<&str> for NodeId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<u64> for NodeId {
    fn from(key: u64) -> Self {
        Self::new(&key.to_string())
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeIdVisitor;

        impl de::Visitor<'_> for NodeIdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a node id as a string or an unsigned integer")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<NodeId, E> {
                Ok(NodeId::from(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<NodeId, E> {
                Ok(NodeId::new(&value.to_string()))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<NodeId, E> {
                Ok(NodeId::new(value))
            }
        }

        deserializer.deserialize_any(NodeIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = NodeId::new("alice");
        let id2 = NodeId::new("alice");
        let id3 = NodeId::new("bob");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "alice");
    }

    #[test]
    fn test_numeric_ids_share_textual_form() {
        assert_eq!(NodeId::from(42_u64), NodeId::new("42"));
        assert_ne!(NodeId::from(42_u64), NodeId::from(43_u64));
    }

    #[test]
    fn test_display_trait() {
        let id = NodeId::from(100_u64);
        assert_eq!(format!("{id}"), "100");
    }

    #[test]
    fn test_hash_and_eq() {
        let mut map = HashMap::new();
        map.insert(NodeId::new("key1"), "value1");
        map.insert(NodeId::new("key2"), "value2");

        assert_eq!(map.get(&NodeId::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = NodeId::new("manager");
        assert!(id == "manager");
        assert!(id != "report");
    }
}
