//! The session payload carried inside the login cookie.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved key holding the integrity hash inside a [`SessionData`].
///
/// The entry under this key is excluded from canonicalization, so the hash
/// never covers itself.
pub const HASH_KEY: &str = "hash";

/// A scalar session value.
///
/// The cookie payload is deliberately restricted to scalars: anything else in
/// the wire JSON fails deserialization and the whole cookie is treated as
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Canonical rendering per kind: strings verbatim, integers in decimal,
/// floats in Rust's shortest round-trip decimal form, booleans as
/// `true`/`false`. Changing any of these renderings invalidates every cookie
/// already issued.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Application-chosen session payload: an insertion-ordered mapping from
/// string keys to scalar [`Value`]s.
///
/// Iteration order is insertion order, and the integrity hash is computed
/// over that order, so the same fields inserted in a different order produce
/// a different hash. The serialized JSON form (the cookie wire value)
/// preserves the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData {
    entries: IndexMap<String, Value>,
}

impl SessionData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, appending the key to the iteration order if new.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Removes a key, preserving the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// The stored integrity hash, if present and string-typed.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.entries.get(HASH_KEY).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
