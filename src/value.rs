//! Dynamic value tree for parsed JSON.
//!
//! [`Value`] is what the parser produces and what the deserializer walks.
//! Every node is in exactly one form: a scalar (bool, number, string), an
//! ordered array, or an insertion-ordered object. Two more forms carry no
//! data: [`Value::Empty`], the default node, and [`Value::Invalid`], the
//! sentinel returned by [`parse`](crate::parse) on malformed input.
//!
//! ## Numbers
//!
//! Integers are kept in two slots. Negative integers live in
//! [`Number::Signed`], everything else in [`Number::Unsigned`]; the parser
//! and the `From` impls agree on that rule, so a tree built by hand compares
//! equal to the same tree parsed from text.
//!
//! ```rust
//! use record_json::{Number, Value};
//!
//! assert_eq!(Value::from(5i32), Value::Number(Number::Unsigned(5)));
//! assert_eq!(Value::from(-5i32), Value::Number(Number::Signed(-5)));
//! ```
//!
//! ## Typed extraction
//!
//! [`Value::get`] reads a node into a Rust type. Signed targets fall back to
//! the unsigned slot, so `"7"` can be read as an `i32`; every other pairing
//! must match exactly.
//!
//! ```rust
//! use record_json::Value;
//!
//! let node = Value::from(7u64);
//! assert_eq!(node.get::<i32>().unwrap(), 7);
//! assert!(node.get::<f64>().is_err());
//! ```

use crate::{Error, JsonMap, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A node of the dynamic value tree.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Default node, holds nothing.
    #[default]
    Empty,
    /// Error sentinel.
    Invalid,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(JsonMap),
}

/// A numeric scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Signed(_) | Number::Unsigned(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    fn kind(&self) -> &'static str {
        match self {
            Number::Signed(_) => "signed integer",
            Number::Unsigned(_) => "unsigned integer",
            Number::Float(_) => "float",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Signed(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

static EMPTY: Value = Value::Empty;

impl Value {
    /// Returns `true` if the node holds data.
    ///
    /// Scalars and arrays are always valid, objects only when they have at
    /// least one member. `Empty` and `Invalid` are never valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_json::{JsonMap, Value};
    ///
    /// assert!(Value::from(0).is_valid());
    /// assert!(Value::Array(vec![]).is_valid());
    /// assert!(!Value::Object(JsonMap::new()).is_valid());
    /// assert!(!Value::Invalid.is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Value::Empty | Value::Invalid => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Reads the node as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the node does not hold a slot
    /// compatible with `T`, and [`Error::OutOfRange`] when the number does
    /// not fit.
    pub fn get<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    /// Returns the `index`-th member of an object, in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_json::Value;
    ///
    /// let mut node = Value::default();
    /// node["b"] = Value::from(1);
    /// node["a"] = Value::from(2);
    ///
    /// assert_eq!(node.get_at(0), Some(&Value::from(1)));
    /// assert_eq!(node.get_at(2), None);
    /// ```
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get_index(index).map(|(_, value)| value),
            _ => None,
        }
    }

    /// Returns the member stored under `key`, without inserting.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Appends to an array node. An `Empty` node becomes an array first.
    ///
    /// # Panics
    ///
    /// Panics if the node holds anything other than an array.
    pub fn push(&mut self, value: Value) {
        if let Value::Empty = self {
            *self = Value::Array(Vec::new());
        }
        match self {
            Value::Array(items) => items.push(value),
            other => panic!("cannot push onto {}", other.kind()),
        }
    }

    /// Number of members of an object or elements of an array; 0 otherwise.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short description of the stored form, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "empty node",
            Value::Invalid => "invalid node",
            Value::Bool(_) => "bool",
            Value::Number(n) => n.kind(),
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Reads a member without inserting; absent keys yield an `Empty` node.
    fn index(&self, key: &str) -> &Value {
        self.get_key(key).unwrap_or(&EMPTY)
    }
}

impl IndexMut<&str> for Value {
    /// Returns the slot for `key`, inserting an `Empty` node when absent.
    /// An `Empty` node becomes an object first.
    ///
    /// Panics if the node holds anything other than an object.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        if let Value::Empty = self {
            *self = Value::Object(JsonMap::new());
        }
        match self {
            Value::Object(map) => map.slot(key),
            other => panic!("cannot index into {} with key {:?}", other.kind(), key),
        }
    }
}

/// Typed extraction from a tree node.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

macro_rules! impl_from_value_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    match value {
                        Value::Number(Number::Unsigned(n)) => <$ty>::try_from(*n)
                            .map_err(|_| Error::out_of_range(n, stringify!($ty))),
                        other => Err(Error::type_mismatch(stringify!($ty), other.kind())),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_value_signed {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    match value {
                        Value::Number(Number::Signed(n)) => <$ty>::try_from(*n)
                            .map_err(|_| Error::out_of_range(n, stringify!($ty))),
                        // non-negative tokens are stored unsigned
                        Value::Number(Number::Unsigned(n)) => <$ty>::try_from(*n)
                            .map_err(|_| Error::out_of_range(n, stringify!($ty))),
                        other => Err(Error::type_mismatch(stringify!($ty), other.kind())),
                    }
                }
            }
        )*
    };
}

impl_from_value_unsigned!(u8, u16, u32, u64, usize);
impl_from_value_signed!(i8, i16, i32, i64, isize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(Number::Float(f)) => Ok(*f),
            other => Err(Error::type_mismatch("f64", other.kind())),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(Number::Float(f)) => Ok(*f as f32),
            other => Err(Error::type_mismatch("f32", other.kind())),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    if value < 0 {
                        Value::Number(Number::Signed(value as i64))
                    } else {
                        Value::Number(Number::Unsigned(value as u64))
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Unsigned(value as u64))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<JsonMap> for Value {
    fn from(value: JsonMap) -> Self {
        Value::Object(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Empty | Value::Invalid => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Signed(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Empty)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Empty)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    items.push(elem);
                }
                Ok(Value::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut members = JsonMap::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    *members.slot(&key) = value;
                }
                Ok(Value::Object(members))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
