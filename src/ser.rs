//! Serialization of reflected values to JSON text.
//!
//! The [`Serializer`] walks a value through [`Reflect::view`] and writes
//! one entry per line:
//!
//! - named entries `"name": value,` inside records
//! - bare entries `value,` inside arrays and at the top level
//! - one indent unit per nesting level, and a `,\n` after every entry; the
//!   final one is trimmed by [`Serializer::into_inner`]
//!
//! Field names come from a [`Context`] passed down the recursion. Entering
//! a record pushes its field names; each named entry consumes the next
//! one.
//!
//! ```rust
//! use record_json::{record, to_string};
//!
//! #[derive(Default)]
//! struct Vector { x: f64, y: f64 }
//! record!(Vector { x, y });
//!
//! let text = to_string(&Vector { x: 1.0, y: 2.5 }).unwrap();
//! assert_eq!(text, "{\n\t\"x\": 1.000000,\n\t\"y\": 2.500000,\n}");
//! ```
//!
//! An unnamed array (a top-level array or an element of another array)
//! gets one extra indent level:
//!
//! ```rust
//! use record_json::to_string;
//!
//! let text = to_string(&vec![vec![1u8]]).unwrap();
//! assert_eq!(text, "\t[\n\t\t\t[\n\t\t\t\t1,\n\t\t\t],\n\t]");
//! ```

use crate::reflect::{Reflect, View};
use crate::{EncodeOptions, Error, JsonMap, Number, Result, Value};
use std::fmt::Write;

/// Per-call serialization state.
///
/// Holds the current indentation depth and one scope per open record.
/// A scope keeps the record's field names reversed, so the next name is
/// always at the back.
#[derive(Debug, Default)]
pub struct Context {
    indent: usize,
    scopes: Vec<Vec<&'static str>>,
}

impl Context {
    fn enter(&mut self, names: &'static [&'static str]) {
        self.scopes.push(names.iter().rev().copied().collect());
    }

    fn leave(&mut self) {
        self.scopes.pop();
    }

    /// Name of the next field in the innermost record, if any.
    fn current_name(&self) -> Option<&'static str> {
        self.scopes.last().and_then(|names| names.last().copied())
    }

    fn advance(&mut self) {
        if let Some(names) = self.scopes.last_mut() {
            names.pop();
        }
    }
}

/// The JSON text serializer.
pub struct Serializer {
    output: String,
    options: EncodeOptions,
}

impl Serializer {
    pub fn new(options: EncodeOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    /// Appends the encoding of one top-level value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] for non-finite floats.
    pub fn serialize(&mut self, cx: &mut Context, value: &dyn Reflect) -> Result<()> {
        self.emit(cx, value, false)
    }

    /// Returns the text with the trailing `",\n"` of the last entry trimmed.
    pub fn into_inner(mut self) -> String {
        if self.output.ends_with(",\n") {
            self.output.truncate(self.output.len() - 2);
        }
        self.output
    }

    fn emit(&mut self, cx: &mut Context, value: &dyn Reflect, in_container: bool) -> Result<()> {
        let name = if in_container {
            None
        } else {
            cx.current_name()
        };
        self.write_indent(cx.indent);

        match value.view() {
            View::Primitive(scalar) => {
                self.write_key(name);
                self.write_scalar(&scalar)?;
                self.output.push_str(",\n");
            }
            View::Text(text) => {
                self.write_key(name);
                self.output.push('"');
                self.output.push_str(text);
                self.output.push_str("\",\n");
            }
            View::Sequence(elements) => {
                let nested = name.is_none();
                if nested {
                    self.write_indent(1);
                    cx.indent += 1;
                }
                self.write_key(name);
                self.output.push_str("[\n");

                cx.indent += 1;
                for element in elements {
                    self.emit(cx, element, true)?;
                }
                cx.indent -= 1;

                self.write_indent(cx.indent);
                if nested {
                    cx.indent -= 1;
                }
                self.output.push_str("],\n");
            }
            View::Record { names, fields } => {
                cx.enter(names);
                self.write_key(name);
                self.output.push_str("{\n");

                cx.indent += 1;
                for field in fields {
                    self.emit(cx, field, false)?;
                }
                cx.indent -= 1;

                self.write_indent(cx.indent);
                self.output.push_str("},\n");
                cx.leave();
            }
        }

        if !in_container {
            cx.advance();
        }
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) {
        let unit = self.options.indent;
        for _ in 0..depth * unit.width() {
            self.output.push(unit.as_char());
        }
    }

    fn write_key(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.output.push('"');
            self.output.push_str(name);
            self.output.push_str("\": ");
        }
    }

    fn write_scalar(&mut self, scalar: &Value) -> Result<()> {
        match scalar {
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(Number::Signed(i)) => {
                let _ = write!(self.output, "{}", i);
            }
            Value::Number(Number::Unsigned(u)) => {
                let _ = write!(self.output, "{}", u);
            }
            Value::Number(Number::Float(f)) => {
                if !f.is_finite() {
                    return Err(Error::unsupported_value(format!(
                        "non-finite float {}",
                        f
                    )));
                }
                let precision = self.options.precision;
                let _ = write!(self.output, "{:.*}", precision, f);
                if precision == 0 {
                    self.output.push_str(".0");
                }
            }
            other => {
                return Err(Error::unsupported_value(format!(
                    "{} is not a primitive",
                    other.kind()
                )))
            }
        }
        Ok(())
    }
}

/// Builds a [`Value`] tree from a reflected value.
///
/// Records become objects keyed by field name in declaration order,
/// sequences become arrays and primitives become scalar nodes.
pub fn to_value(value: &dyn Reflect) -> Value {
    match value.view() {
        View::Primitive(scalar) => scalar,
        View::Text(text) => Value::from(text),
        View::Sequence(elements) => Value::Array(elements.into_iter().map(to_value).collect()),
        View::Record { names, fields } => {
            let mut members = JsonMap::with_capacity(names.len());
            for (name, field) in names.iter().zip(fields) {
                members.insert((*name).to_string(), to_value(field));
            }
            Value::Object(members)
        }
    }
}
