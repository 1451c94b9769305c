//! Configuration options for encoding.
//!
//! - [`EncodeOptions`]: main configuration struct
//! - [`Indent`]: indentation unit written once per nesting level
//!
//! The defaults produce the canonical output: tab indentation and six
//! fractional digits for floats.
//!
//! ## Examples
//!
//! ```rust
//! use record_json::{record, to_string_with_options, EncodeOptions, Indent};
//!
//! #[derive(Default)]
//! struct Sample { ratio: f64 }
//! record!(Sample { ratio });
//!
//! let options = EncodeOptions::new()
//!     .with_precision(2)
//!     .with_indent(Indent::Spaces(2));
//! let text = to_string_with_options(&Sample { ratio: 0.5 }, options).unwrap();
//! assert_eq!(text, "{\n  \"ratio\": 0.50,\n}");
//! ```

/// Indentation unit.
///
/// # Examples
///
/// ```rust
/// use record_json::Indent;
///
/// assert_eq!(Indent::Tab.width(), 1);
/// assert_eq!(Indent::Spaces(4).width(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    /// Number of characters written per nesting level.
    #[must_use]
    pub const fn width(&self) -> usize {
        match self {
            Indent::Tab => 1,
            Indent::Spaces(n) => *n,
        }
    }

    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Indent::Tab => '\t',
            Indent::Spaces(_) => ' ',
        }
    }
}

/// Configuration options for encoding.
///
/// # Examples
///
/// ```rust
/// use record_json::{EncodeOptions, Indent};
///
/// let options = EncodeOptions::new();
/// assert_eq!(options.precision, 6);
/// assert_eq!(options.indent, Indent::Tab);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeOptions {
    /// Fractional digits written for floating-point values.
    pub precision: usize,
    pub indent: Indent,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            precision: 6,
            indent: Indent::default(),
        }
    }
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of fractional digits written for floats.
    ///
    /// A precision of 0 still writes a trailing `.0` so the value reads
    /// back as a float.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
