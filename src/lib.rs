//! # record_json
//!
//! A schema-less JSON codec for plain Rust records.
//!
//! Types opt in by declaring their field list with [`record!`]; no derive
//! and no schema are involved. The crate then provides:
//!
//! - **Serialization** of records, sequences and primitives to a canonical,
//!   tab-indented JSON text with a trailing comma after every entry
//! - **Parsing** of JSON text into a dynamic [`Value`] tree, tolerant of
//!   CRLF line endings and trailing commas
//! - **Deserialization** of a tree back onto a record, binding object
//!   members to fields by position
//!
//! ## Quick Start
//!
//! ```rust
//! use record_json::{from_str, record, to_string};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Vector { x: f64, y: f64, z: f64 }
//! record!(Vector { x, y, z });
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Transform { position: Vector, scale: Vector }
//! record!(Transform { position, scale });
//!
//! let t = Transform {
//!     position: Vector { x: 1.0, y: 2.0, z: 3.0 },
//!     scale: Vector { x: 0.5, y: 0.5, z: 0.5 },
//! };
//!
//! let text = to_string(&t).unwrap();
//! assert!(text.starts_with("{\n\t\"position\": {\n\t\t\"x\": 1.000000,\n"));
//!
//! let back: Transform = from_str(&text).unwrap();
//! assert_eq!(back, t);
//! ```
//!
//! ### Working with the Value tree
//!
//! ```rust
//! use record_json::{parse, Value};
//!
//! let tree = parse(r#"{"name": "box", "size": [1, 2, 3]}"#);
//! assert_eq!(tree["name"].as_str(), Some("box"));
//! assert_eq!(tree["size"].len(), 3);
//! assert_eq!(tree.get_at(0), Some(&Value::from("box")));
//!
//! // malformed input yields the invalid sentinel instead of an error
//! assert!(parse("{ oops }").is_invalid());
//! ```
//!
//! ### Enums
//!
//! Fieldless enums are written as their integer discriminant:
//!
//! ```rust
//! use record_json::{from_str, json_enum, record, to_string};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! #[repr(i32)]
//! enum Facing { #[default] North = 0, South = 1, Down = -1 }
//! json_enum!(Facing as i32 { North, South, Down });
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Actor { facing: Facing }
//! record!(Actor { facing });
//!
//! let text = to_string(&Actor { facing: Facing::Down }).unwrap();
//! assert_eq!(text, "{\n\t\"facing\": -1,\n}");
//! assert_eq!(from_str::<Actor>(&text).unwrap().facing, Facing::Down);
//! ```
//!
//! ## Binding rules
//!
//! Object members bind to record fields by position; see [`de`] for the
//! exact rules and the one name-aware exception for partial objects.
//!
//! ## Logging
//!
//! Events go through the `tracing` facade. Nothing is printed unless the
//! application installs a subscriber.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod reflect;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::JsonMap;
pub use options::{EncodeOptions, Indent};
pub use parser::{Parser, MAX_DEPTH};
pub use reflect::{Category, Leaf, Record, Reflect, SequenceMut, View, ViewMut};
pub use ser::{Context, Serializer};
pub use value::{FromValue, Number, Value};

use std::io;

/// Serialize a reflected value to a JSON string.
///
/// # Examples
///
/// ```rust
/// use record_json::{record, to_string};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "{\n\t\"x\": 1,\n\t\"y\": 2,\n}");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if the value holds a non-finite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Reflect>(value: &T) -> Result<String> {
    to_string_with_options(value, EncodeOptions::default())
}

/// Serialize a reflected value to a JSON string with custom options.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if the value holds a non-finite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Reflect>(value: &T, options: EncodeOptions) -> Result<String> {
    encode(&[value as &dyn Reflect], options)
}

/// Serialize several values one after another into one string.
///
/// The fragments are concatenated without any enclosing array or object.
///
/// # Examples
///
/// ```rust
/// use record_json::to_string_many;
///
/// let text = to_string_many(&[&1u8, &"two".to_string(), &vec![3u8]]).unwrap();
/// assert_eq!(text, "1,\n\"two\",\n\t[\n\t\t3,\n\t]");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if any value holds a non-finite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_many(values: &[&dyn Reflect]) -> Result<String> {
    encode(values, EncodeOptions::default())
}

fn encode(values: &[&dyn Reflect], options: EncodeOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    let mut cx = Context::default();
    for value in values {
        serializer.serialize(&mut cx, *value)?;
    }
    let text = serializer.into_inner();
    tracing::trace!(values = values.len(), bytes = text.len(), "encoded");
    Ok(text)
}

/// Serialize a reflected value to a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Reflect,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert a reflected value to a [`Value`] tree without going through text.
///
/// # Examples
///
/// ```rust
/// use record_json::{record, to_value};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let value = to_value(&Point { x: 1, y: -2 });
/// assert!(value.is_object());
/// assert_eq!(value["y"].get::<i32>().unwrap(), -2);
/// ```
#[must_use]
pub fn to_value<T: Reflect>(value: &T) -> Value {
    ser::to_value(value)
}

/// Parse JSON text into a [`Value`] tree.
///
/// Never fails: malformed input is reported as a `tracing` warning with
/// its line and column, and [`Value::Invalid`] is returned. Use
/// [`try_parse`] to get the error instead.
#[must_use]
pub fn parse(text: &str) -> Value {
    match try_parse(text) {
        Ok(tree) => tree,
        Err(err) => {
            let (line, column) = err.position().unwrap_or_default();
            tracing::warn!(line, column, error = %err, "failed to parse JSON text");
            Value::Invalid
        }
    }
}

/// Parse JSON text into a [`Value`] tree.
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the line and column of the first
/// unexpected character.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn try_parse(text: &str) -> Result<Value> {
    Parser::new(text).parse()
}

/// Bind a [`Value`] tree onto a fresh `T::default()`.
///
/// # Examples
///
/// ```rust
/// use record_json::{from_value, json, record};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let point: Point = from_value(json!({ "x": 3, "y": (-4) })).unwrap();
/// assert_eq!(point, Point { x: 3, y: -4 });
/// ```
///
/// # Errors
///
/// Returns an error if a present node has the wrong form for its target or
/// a number does not fit the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T: Reflect + Default>(tree: Value) -> Result<T> {
    let mut target = T::default();
    Deserializer::new(tree).deserialize_into(&mut target)?;
    Ok(target)
}

/// Deserialize a `T` from JSON text.
///
/// # Examples
///
/// ```rust
/// use record_json::{from_str, record};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let point: Point = from_str("{\n\t\"x\": 1,\n\t\"y\": 2,\n}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
///
/// // empty input leaves every field at its default
/// assert_eq!(from_str::<Point>("").unwrap(), Point::default());
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or cannot be bound to `T`.
/// Syntax errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: Reflect + Default>(text: &str) -> Result<T> {
    let tree = try_parse(text)?;
    tracing::trace!(bytes = text.len(), "decoding");
    from_value(tree)
}

/// Deserialize a `T` from an I/O stream of JSON text.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid JSON, or it
/// cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Reflect + Default,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize a `T` from bytes of JSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid JSON, or
/// cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T: Reflect + Default>(v: &[u8]) -> Result<T> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
