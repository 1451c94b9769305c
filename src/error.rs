//! Error types for encoding, parsing and binding.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: malformed JSON text, with 1-based line/column information
//! - **Type Mismatches**: a tree node read through an accessor for a different slot
//! - **Range Errors**: a number that does not fit the target field type
//! - **Unsupported Values**: values the text grammar cannot express (NaN, infinities)
//! - **I/O Errors**: reader/writer failures
//!
//! Type mismatches and range errors are contract violations between the
//! parsed tree and the target shape. They are always reported, never
//! papered over with a default value.
//!
//! ## Examples
//!
//! ```rust
//! use record_json::{try_parse, Error};
//!
//! let err = try_parse("{\n  \"a\" 1\n}").unwrap_err();
//! assert_eq!(err.position(), Some((2, 7)));
//! assert!(matches!(err, Error::Syntax { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed JSON text
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// A node was read through an accessor that does not match its stored slot
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A number does not fit the requested type
    #[error("Value {value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    /// An integer does not name any variant of a registered enum
    #[error("{value} is not a discriminant of {ty}")]
    UnknownVariant { ty: &'static str, value: String },

    /// The value has no representation in the text grammar
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at a 1-based line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_json::Error;
    ///
    /// let err = Error::syntax(10, 5, "expected ':'");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_json::Error;
    ///
    /// let err = Error::type_mismatch("u32", "string");
    /// assert!(err.to_string().contains("expected u32"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn out_of_range<T: fmt::Display>(value: T, target: &'static str) -> Self {
        Error::OutOfRange {
            value: value.to_string(),
            target,
        }
    }

    pub fn unknown_variant<T: fmt::Display>(ty: &'static str, value: T) -> Self {
        Error::UnknownVariant {
            ty,
            value: value.to_string(),
        }
    }

    pub fn unsupported_value<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` of a syntax error.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_position() {
        let err = Error::syntax(3, 14, "expected '\"'");
        assert_eq!(err.position(), Some((3, 14)));
        assert_eq!(
            err.to_string(),
            "Syntax error at line 3, column 14: expected '\"'"
        );
    }

    #[test]
    fn test_non_syntax_has_no_position() {
        assert_eq!(Error::type_mismatch("bool", "string").position(), None);
        assert_eq!(Error::out_of_range(300, "u8").position(), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::out_of_range(-1, "u8").to_string(),
            "Value -1 is out of range for u8"
        );
        assert_eq!(
            Error::unknown_variant("Mode", 7).to_string(),
            "7 is not a discriminant of Mode"
        );
        assert_eq!(
            Error::unknown_variant("Wide", u64::MAX).to_string(),
            "18446744073709551615 is not a discriminant of Wide"
        );
    }
}
