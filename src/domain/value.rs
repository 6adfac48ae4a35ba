use std::fmt;

use serde::Serialize;

/// An unvalidated parameter value as written in an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A single token or quoted string (quotes stripped).
    Scalar(String),
    /// A bracketed list of tokens.
    List(Vec<String>),
}

impl RawValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        RawValue::Scalar(value.into())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Scalar(value) => write!(f, "{}", value),
            RawValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A validated, typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Array(Vec<String>),
    Enum(String),
}

impl ParamValue {
    /// The form used to key a `valueMap` lookup.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Convert to a template context value.
    pub fn to_template_value(&self) -> minijinja::Value {
        match self {
            ParamValue::String(s) | ParamValue::Enum(s) => minijinja::Value::from(s.as_str()),
            ParamValue::Number(n) if is_integral(*n) => minijinja::Value::from(*n as i64),
            ParamValue::Number(n) => minijinja::Value::from(*n),
            ParamValue::Boolean(b) => minijinja::Value::from(*b),
            ParamValue::Array(items) => minijinja::Value::from(items.clone()),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < 1e15
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) | ParamValue::Enum(s) => write!(f, "{}", s),
            ParamValue::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Boolean(b) => write!(f, "{}", b),
            ParamValue::Array(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(ParamValue::Number(3.0).to_string(), "3");
        assert_eq!(ParamValue::Number(-2.0).to_string(), "-2");
        assert_eq!(ParamValue::Number(0.5).to_string(), "0.5");
    }

    #[test]
    fn arrays_join_with_comma() {
        let value = ParamValue::Array(vec!["a".into(), "b c".into()]);
        assert_eq!(value.to_string(), "a, b c");
    }

    #[test]
    fn boolean_key_is_lowercase_literal() {
        assert_eq!(ParamValue::Boolean(true).key(), "true");
        assert_eq!(ParamValue::Boolean(false).key(), "false");
    }

    #[test]
    fn raw_list_display() {
        assert_eq!(RawValue::List(vec!["x".into(), "y".into()]).to_string(), "[x, y]");
    }
}
