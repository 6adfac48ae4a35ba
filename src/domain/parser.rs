//! Line-oriented invocation parser.
//!
//! Grammar, per line after trimming:
//!
//! ```text
//! line   := MARKER ident [ "(" [ param { "," param } ] ")" ]
//! param  := ident "=" value
//! value  := quoted | list | token
//! list   := "[" [ item { "," item } ] "]"
//! ```
//!
//! A line starting with the marker that does not match produces a
//! [`ParseWarning`] and stays in the body unchanged.

use super::error::AppError;
use super::invocation::{Invocation, ParseWarning};
use super::validation::validate_marker;
use super::value::RawValue;

pub const DEFAULT_MARKER: &str = "+++";

/// Result of scanning annotated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    /// Invocations in source order.
    pub invocations: Vec<Invocation>,
    /// Input with invocation lines removed, trimmed.
    pub body: String,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone)]
pub struct InvocationParser {
    marker: String,
}

impl Default for InvocationParser {
    fn default() -> Self {
        Self { marker: DEFAULT_MARKER.to_string() }
    }
}

impl InvocationParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom three-character marker.
    pub fn with_marker(marker: &str) -> Result<Self, AppError> {
        if !validate_marker(marker) {
            return Err(AppError::config_error(format!(
                "Invalid invocation marker '{}': must be three non-alphanumeric, non-whitespace characters",
                marker
            )));
        }
        Ok(Self { marker: marker.to_string() })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Extract invocations and the stripped body from `text`.
    pub fn parse(&self, text: &str) -> ParsedText {
        let mut parsed = ParsedText::default();
        let mut kept: Vec<&str> = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim_start();
            let Some(rest) = trimmed.strip_prefix(self.marker.as_str()) else {
                kept.push(line);
                continue;
            };

            let line_no = index + 1;
            let column = line[..line.len() - trimmed.len()].chars().count() + 1;
            match parse_invocation(rest) {
                Ok((name, params)) => parsed.invocations.push(Invocation {
                    name,
                    params,
                    line: line_no,
                    column,
                }),
                Err(reason) => {
                    parsed.warnings.push(ParseWarning {
                        line: line_no,
                        column,
                        text: line.to_string(),
                        reason,
                    });
                    kept.push(line);
                }
            }
        }

        parsed.body = kept.join("\n").trim().to_string();
        parsed
    }
}

type ParsedInvocation = (String, Vec<(String, RawValue)>);

fn parse_invocation(src: &str) -> Result<ParsedInvocation, String> {
    let mut cursor = Cursor::new(src);
    let name = cursor
        .identifier()
        .ok_or_else(|| "expected a decorator name after the marker".to_string())?
        .to_string();

    let mut params: Vec<(String, RawValue)> = Vec::new();
    match cursor.peek() {
        None => return Ok((name, params)),
        Some('(') => {
            cursor.bump();
        }
        Some(c) if c.is_whitespace() => {
            cursor.skip_ws();
            return if cursor.at_end() {
                Ok((name, params))
            } else {
                Err(format!("unexpected text after decorator name '{}'", name))
            };
        }
        Some(c) => return Err(format!("unexpected character '{}' in decorator name", c)),
    }

    cursor.skip_ws();
    if !cursor.eat(')') {
        loop {
            cursor.skip_ws();
            let key = cursor
                .identifier()
                .ok_or_else(|| match cursor.peek() {
                    None => "unbalanced parentheses".to_string(),
                    Some(_) => "expected a parameter name".to_string(),
                })?
                .to_string();
            cursor.skip_ws();
            if !cursor.eat('=') {
                return Err(format!("expected '=' after parameter '{}'", key));
            }
            cursor.skip_ws();
            let value = cursor.value(&key)?;
            if params.iter().any(|(k, _)| k == &key) {
                return Err(format!("duplicate parameter '{}'", key));
            }
            params.push((key, value));

            cursor.skip_ws();
            match cursor.bump() {
                Some(',') => continue,
                Some(')') => break,
                None => return Err("unbalanced parentheses".to_string()),
                Some(c) => return Err(format!("expected ',' or ')' but found '{}'", c)),
            }
        }
    }

    cursor.skip_ws();
    if cursor.at_end() {
        Ok((name, params))
    } else {
        Err("unexpected text after ')'".to_string())
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn identifier(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                Some(self.take_while(|c| c.is_ascii_alphanumeric() || c == '_'))
            }
            _ => None,
        }
    }

    fn value(&mut self, key: &str) -> Result<RawValue, String> {
        match self.peek() {
            Some('[') => {
                self.bump();
                self.list(key).map(RawValue::List)
            }
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.quoted(quote, key).map(RawValue::Scalar)
            }
            _ => self.token(key, &[',', ')']).map(RawValue::Scalar),
        }
    }

    fn quoted(&mut self, quote: char, key: &str) -> Result<String, String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(format!("unterminated string for parameter '{}'", key)),
                Some('\\') => match self.bump() {
                    Some(c) if c == quote || c == '\\' => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => return Err(format!("unterminated string for parameter '{}'", key)),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn token(&mut self, key: &str, terminators: &[char]) -> Result<String, String> {
        let token = self.take_while(|c| {
            !c.is_whitespace() && !terminators.contains(&c) && !matches!(c, '(' | '[' | ']' | '"' | '\'')
        });
        if token.is_empty() {
            return match self.peek() {
                Some('(') => Err(format!("unexpected '(' in value of parameter '{}'", key)),
                _ => Err(format!("missing value for parameter '{}'", key)),
            };
        }
        Ok(token.to_string())
    }

    fn list(&mut self, key: &str) -> Result<Vec<String>, String> {
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat(']') {
            return Ok(items);
        }
        loop {
            self.skip_ws();
            let item = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.bump();
                    self.quoted(quote, key)?
                }
                _ => self.token(key, &[',', ']'])?,
            };
            items.push(item);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(items),
                _ => return Err(format!("unterminated list for parameter '{}'", key)),
            }
        }
    }
}
