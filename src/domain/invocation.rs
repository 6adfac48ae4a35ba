use serde::Serialize;

use super::value::RawValue;

/// A parsed, not-yet-validated reference to a decorator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Decorator name as written.
    pub name: String,
    /// Raw parameters in source order. Keys are unique.
    pub params: Vec<(String, RawValue)>,
    /// 1-based line of the invocation in the annotated text.
    pub line: usize,
    /// 1-based column of the marker.
    pub column: usize,
}

impl Invocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: Vec::new(), line: 1, column: 1 }
    }

    /// Add a raw parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: RawValue) -> Self {
        self.params.push((key.into(), value));
        self
    }

    /// Set the source position.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn param(&self, key: &str) -> Option<&RawValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// A line that carried the marker but did not match the invocation grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub line: usize,
    pub column: usize,
    /// The offending line, verbatim.
    pub text: String,
    pub reason: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}:{}: {} ({})", self.line, self.column, self.reason, self.text.trim())
    }
}
