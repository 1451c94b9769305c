//! Character-level JSON parser.
//!
//! Turns text into a [`Value`] tree in a single pass. The accepted grammar
//! is deliberately small:
//!
//! - objects `{ "key": value, ... }` and arrays `[ value, ... ]`, each
//!   allowing a trailing comma before the closing bracket (the encoder
//!   writes one after every entry)
//! - strings `"..."`, copied verbatim up to the next `"` (no escapes)
//! - bare tokens up to the next `,`, `}` or `]`, trimmed of whitespace and
//!   classified as bool, float, signed or unsigned integer
//!
//! Space, tab, `\n` and `\r` are skipped between elements, so CRLF input
//! parses the same as LF input. Objects and arrays nest at most
//! [`MAX_DEPTH`] levels deep.
//!
//! ```rust
//! use record_json::{parse, Number, Value};
//!
//! let tree = parse("{\r\n\t\"a\": 1.5,\r\n\t\"b\": [-1, 2],\r\n}");
//! assert_eq!(tree.get_at(0), Some(&Value::Number(Number::Float(1.5))));
//! assert_eq!(tree["b"].len(), 2);
//! ```

use crate::{Error, JsonMap, Number, Result, Value};

/// Deepest accepted nesting of objects and arrays.
pub const MAX_DEPTH: usize = 128;

/// Single-use parser over one input string.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    /// Parses the whole input as one value.
    ///
    /// Empty or whitespace-only input yields [`Value::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] at the first unexpected character.
    pub fn parse(mut self) -> Result<Value> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(Value::Empty);
        }

        let value = self.parse_value()?;

        self.skip_whitespace();
        if !self.at_end() {
            return Err(self.error("unexpected characters after value"));
        }
        Ok(value)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char() {
            self.next_char();
        }
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, msg)
    }

    fn expect(&mut self, expected: char, msg: &str) -> Result<()> {
        if self.peek_char() == Some(expected) {
            self.next_char();
            Ok(())
        } else {
            Err(self.error(msg))
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_char() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') => self.parse_string().map(Value::String),
            Some(_) => self.parse_token(),
            None => Err(self.error("unexpected end of input, expected a value")),
        }
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.descend()?;
        self.expect('{', "expected '{'")?;
        let mut members = JsonMap::new();

        loop {
            self.skip_whitespace();
            if self.peek_char() == Some('}') {
                self.next_char();
                break;
            }

            if self.peek_char() != Some('"') {
                return Err(self.error("expected '\"' to start an object key"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            self.expect(':', "expected ':' after object key")?;
            self.skip_whitespace();

            let value = self.parse_value()?;
            *members.slot(&key) = value;

            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some('}') => {
                    self.next_char();
                    break;
                }
                _ => return Err(self.error("expected ',' or '}' after object member")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.descend()?;
        self.expect('[', "expected '['")?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(']') {
                self.next_char();
                break;
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some(']') => {
                    self.next_char();
                    break;
                }
                _ => return Err(self.error("expected ',' or ']' after array element")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect('"', "expected '\"'")?;
        let start = self.position;
        loop {
            match self.peek_char() {
                Some('"') => break,
                Some(_) => {
                    self.next_char();
                }
                None => return Err(self.error("unterminated string")),
            }
        }
        let text = self.input[start..self.position].to_string();
        self.next_char();
        Ok(text)
    }

    fn parse_token(&mut self) -> Result<Value> {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if matches!(ch, ',' | '}' | ']') {
                break;
            }
            self.next_char();
        }

        let token = self.input[start..self.position].trim_matches([' ', '\t', '\n', '\r']);
        classify_token(token).ok_or_else(|| {
            Error::syntax(line, column, &format!("invalid primitive token {:?}", token))
        })
    }
}

/// Classifies a bare token by substring tests.
///
/// `true`/`false` first, then `.` selects a float and a `-` anywhere selects
/// a signed integer; everything else must be an unsigned integer. A token
/// the selected parse rejects is `None`.
fn classify_token(token: &str) -> Option<Value> {
    match token {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }

    let number = if token.contains('.') {
        Number::Float(token.parse().ok()?)
    } else if token.contains('-') {
        Number::Signed(token.parse().ok()?)
    } else {
        Number::Unsigned(token.parse().ok()?)
    };
    Some(Value::Number(number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    fn parse(input: &str) -> Result<Value> {
        Parser::new(input).parse()
    }

    #[test]
    fn test_token_classification() {
        assert_eq!(classify_token("true"), Some(Value::Bool(true)));
        assert_eq!(classify_token("false"), Some(Value::Bool(false)));
        assert_eq!(classify_token("1.250000"), Some(Value::from(1.25)));
        assert_eq!(classify_token("-1.5"), Some(Value::from(-1.5)));
        assert_eq!(classify_token("-7"), Some(Value::Number(Number::Signed(-7))));
        assert_eq!(classify_token("7"), Some(Value::Number(Number::Unsigned(7))));
        assert_eq!(
            classify_token("18446744073709551615"),
            Some(Value::Number(Number::Unsigned(u64::MAX)))
        );
    }

    #[test]
    fn test_token_classification_rejects() {
        // '-' anywhere selects the signed parse, which rejects these
        assert_eq!(classify_token("1-2"), None);
        assert_eq!(classify_token("1e-5"), None);
        assert_eq!(classify_token("null"), None);
        assert_eq!(classify_token("True"), None);
        assert_eq!(classify_token(""), None);
    }

    #[test]
    fn test_object_keeps_key_order() {
        let tree = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = tree.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_key_reuses_slot() {
        let tree = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get_at(0), Some(&Value::from(3)));
    }

    #[test]
    fn test_nested() {
        let tree = parse(r#"{"p": {"x": 1.0, "y": -2}, "list": [[1, 2], [3]], "s": "hi there"}"#)
            .unwrap();
        let expected = json!({
            "p": { "x": 1.0, "y": (-2) },
            "list": [[1, 2], [3]],
            "s": "hi there"
        });
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_trailing_commas() {
        let tree = parse("{\n\t\"a\": [\n\t\t1,\n\t\t2,\n\t],\n}").unwrap();
        assert_eq!(tree, json!({ "a": [1, 2] }));
    }

    #[test]
    fn test_top_level_scalars_and_arrays() {
        assert_eq!(parse("42").unwrap(), Value::from(42));
        assert_eq!(parse("  \"x\"  ").unwrap(), Value::from("x"));
        assert_eq!(parse("\t[\n\t\t1,\n\t]").unwrap(), json!([1]));
        assert_eq!(parse("").unwrap(), Value::Empty);
        assert_eq!(parse(" \r\n ").unwrap(), Value::Empty);
    }

    #[test]
    fn test_strings_are_verbatim() {
        let tree = parse(r#"{"path": "C:\temp\n"}"#).unwrap();
        assert_eq!(tree["path"].as_str(), Some(r"C:\temp\n"));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("{}").unwrap(), Value::Object(JsonMap::new()));
        assert_eq!(parse("[ ]").unwrap(), Value::Array(vec![]));
        assert_eq!(parse(r#"{"a": {}}"#).unwrap().get_at(0).map(Value::len), Some(0));
    }

    #[test]
    fn test_missing_colon_position() {
        let err = parse("{\n\t\"a\" 1\n}").unwrap_err();
        assert_eq!(err.position(), Some((2, 6)));
    }

    #[test]
    fn test_missing_quote_on_key() {
        let err = parse("{ a: 1 }").unwrap_err();
        assert_eq!(err.position(), Some((1, 3)));
    }

    #[test]
    fn test_column_resets_after_newline() {
        let err = parse("{\n\"a\": 1,\n\"b\": tru\n}").unwrap_err();
        assert_eq!(err.position(), Some((3, 6)));
    }

    #[test]
    fn test_unterminated() {
        assert!(parse(r#"{"a": "open"#).is_err());
        assert!(parse(r#"{"a": 1"#).is_err());
        assert!(parse("[1, 2").is_err());
        assert!(parse(r#"{"a": }"#).is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let fits = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&fits).is_ok());

        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = parse(&deep).unwrap_err();
        assert_eq!(err.position(), Some((1, MAX_DEPTH + 1)));

        let objects = format!("{}1{}", "{\"a\": ".repeat(MAX_DEPTH + 1), "}".repeat(MAX_DEPTH + 1));
        assert!(parse(&objects).is_err());
    }

    #[test]
    fn test_unbounded_nesting_is_invalid_not_overflow() {
        assert!(crate::parse(&"[".repeat(100_000)).is_invalid());
        assert!(crate::parse(&"{\"k\": ".repeat(100_000)).is_invalid());
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(parse("{} {}").is_err());
        assert!(parse("[1] x").is_err());
    }
}
