//!
//! Values crossing the boundary to the calling environment.
//!
//! Arguments arrive as [`Value`]s converted by the host glue; results leave the same way.
//! Tables are ordered: keys keep insertion order, which is bit order for decoded flags
//! and `1..=n` for indexed sequences.
//!

use bytes::Bytes;
use indexmap::IndexMap;

use crate::flags::FlagMap;

/// Table key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// 1-based position
    Index(i64),
    Name(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent result or error placeholder
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    /// Raw byte string, not necessarily valid UTF-8
    Bytes(Bytes),
    /// Ordered collection passed in by the caller
    List(Vec<Value>),
    Table(IndexMap<Key, Value>),
    /// Host value without a counterpart here; only its type name is kept
    Foreign(String),
}

impl Value {
    /// Build a table indexed from 1
    pub fn indexed<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Table(
            items
                .into_iter()
                .zip(1..)
                .map(|(v, i)| (Key::Index(i), v))
                .collect(),
        )
    }

    /// Type name used in argument error messages
    pub fn type_name(&self) -> &str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "sequence",
            Self::Table(_) => "table",
            Self::Foreign(name) => name,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Look up a named field of a table
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Table(t) => t
                .iter()
                .find_map(|(k, v)| matches!(k, Key::Name(n) if *n == name).then_some(v)),
            _ => None,
        }
    }

    /// Look up a 1-based entry of a table
    pub fn index(&self, i: i64) -> Option<&Value> {
        match self {
            Self::Table(t) => t.get(&Key::Index(i)),
            _ => None,
        }
    }
}

impl From<FlagMap> for Value {
    fn from(flags: FlagMap) -> Self {
        Self::Table(
            flags
                .into_iter()
                .map(|(name, set)| (Key::Name(name), Self::Bool(set)))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        o.map_or(Self::Nil, Into::into)
    }
}
