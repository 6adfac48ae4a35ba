use std::fmt;
use std::io;

use thiserror::Error;

/// Library-wide error type for application-level operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Decorator registry or decoration failure.
    #[error(transparent)]
    Decorator(#[from] DecoratorError),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view of the failure.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Decorator(DecoratorError::NotFound { .. }) => io::ErrorKind::NotFound,
            AppError::Configuration(_)
            | AppError::Decorator(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::Serialization(_) => io::ErrorKind::InvalidData,
        }
    }
}

/// Whether a caller may continue after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The offending invocation can be skipped and the request continued.
    Recoverable,
    /// The whole request (or registry load) must be aborted.
    Terminal,
}

/// Errors raised by the decorator core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecoratorError {
    /// Malformed or duplicate definition. Only raised while loading.
    #[error("Invalid decorator definition{} in {origin}: {reason}", decorator_label(.decorator))]
    Schema { origin: String, decorator: Option<String>, reason: String },

    /// An invocation names a decorator the store does not know.
    #[error("Unknown decorator '{name}'{}", not_found_hint(.name, .available))]
    NotFound { name: String, available: Vec<String> },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),

    /// Instruction template failed to render.
    #[error("Failed to render instruction for decorator '{decorator}': {reason}")]
    Template { decorator: String, reason: String },
}

fn decorator_label(decorator: &Option<String>) -> String {
    decorator.as_deref().map(|d| format!(" '{}'", d)).unwrap_or_default()
}

fn not_found_hint(name: &str, available: &[String]) -> String {
    let close = suggestions(name, available);
    if !close.is_empty() {
        format!(". Did you mean: {}?", close.join(", "))
    } else if !available.is_empty() {
        format!(". Available: {}", available.join(", "))
    } else {
        String::new()
    }
}

/// Names in `available` close to `name`: a case-insensitive prefix match
/// either way, or an edit distance of at most two.
pub fn suggestions<'a>(name: &str, available: &'a [String]) -> Vec<&'a str> {
    let query = name.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    available
        .iter()
        .filter(|candidate| {
            let candidate = candidate.to_lowercase();
            candidate.starts_with(&query)
                || query.starts_with(&candidate)
                || edit_distance(&candidate, &query) <= 2
        })
        .map(String::as_str)
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        previous = current;
    }
    previous[b.len()]
}

impl DecoratorError {
    pub(crate) fn schema(
        origin: impl Into<String>,
        decorator: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        DecoratorError::Schema {
            origin: origin.into(),
            decorator: decorator.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DecoratorError::NotFound { .. } | DecoratorError::Validation(_) => {
                Severity::Recoverable
            }
            DecoratorError::Schema { .. }
            | DecoratorError::Compatibility(_)
            | DecoratorError::Template { .. } => Severity::Terminal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}

/// A parameter failed validation against its spec.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid parameter '{parameter}' for decorator '{decorator}': {rule}")]
pub struct ValidationError {
    pub decorator: String,
    pub parameter: String,
    pub rule: ValidationRule,
}

/// The rule a rejected parameter value violated.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    Missing,
    Unknown,
    NotBoolean { value: String },
    NotNumber { value: String },
    BelowMinimum { value: f64, min: f64 },
    AboveMaximum { value: f64, max: f64 },
    NotInEnum { value: String, allowed: Vec<String> },
    ExpectedScalar,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "required parameter is missing"),
            Self::Unknown => write!(f, "no such parameter is declared"),
            Self::NotBoolean { value } => {
                write!(f, "expected 'true' or 'false', got '{}'", value)
            }
            Self::NotNumber { value } => write!(f, "expected a number, got '{}'", value),
            Self::BelowMinimum { value, min } => {
                write!(f, "value {} is below the minimum {}", value, min)
            }
            Self::AboveMaximum { value, max } => {
                write!(f, "value {} is above the maximum {}", value, max)
            }
            Self::NotInEnum { value, allowed } => {
                write!(f, "'{}' is not one of: {}", value, allowed.join(", "))
            }
            Self::ExpectedScalar => write!(f, "expected a single value, got a list"),
        }
    }
}

/// A conflict or unmet requirement among a set of instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatibilityError {
    #[error("Decorator '{first}' conflicts with '{second}'")]
    Conflict { first: String, second: String },

    #[error("Decorator '{decorator}' requires '{requires}', which is not present")]
    MissingRequirement { decorator: String, requires: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_validation_are_recoverable() {
        let not_found = DecoratorError::NotFound { name: "Nope".into(), available: vec![] };
        let validation = DecoratorError::from(ValidationError {
            decorator: "Expert".into(),
            parameter: "domain".into(),
            rule: ValidationRule::Missing,
        });

        assert!(not_found.is_recoverable());
        assert!(validation.is_recoverable());
    }

    #[test]
    fn schema_and_compatibility_are_terminal() {
        let schema = DecoratorError::schema("inline", Some("A"), "duplicate name");
        let compat = DecoratorError::from(CompatibilityError::Conflict {
            first: "A".into(),
            second: "B".into(),
        });

        assert_eq!(schema.severity(), Severity::Terminal);
        assert_eq!(compat.severity(), Severity::Terminal);
    }

    #[test]
    fn validation_message_names_decorator_parameter_and_rule() {
        let err = ValidationError {
            decorator: "Reasoning".into(),
            parameter: "depth".into(),
            rule: ValidationRule::NotInEnum {
                value: "deep".into(),
                allowed: vec!["basic".into(), "moderate".into()],
            },
        };

        assert_eq!(
            err.to_string(),
            "Invalid parameter 'depth' for decorator 'Reasoning': 'deep' is not one of: basic, moderate"
        );
    }

    #[test]
    fn schema_message_mentions_decorator_when_known() {
        let err = DecoratorError::schema("core/a.yml", Some("A"), "duplicate parameter 'x'");
        assert_eq!(
            err.to_string(),
            "Invalid decorator definition 'A' in core/a.yml: duplicate parameter 'x'"
        );

        let err = DecoratorError::schema("core/b.yml", None, "missing name");
        assert_eq!(err.to_string(), "Invalid decorator definition in core/b.yml: missing name");
    }

    #[test]
    fn not_found_message_suggests_close_names() {
        let available: Vec<String> =
            ["StepByStep", "Reasoning", "Tone"].iter().map(|s| s.to_string()).collect();

        let typo = DecoratorError::NotFound { name: "StepByStp".into(), available: available.clone() };
        let prefix = DecoratorError::NotFound { name: "reason".into(), available: available.clone() };
        let unrelated = DecoratorError::NotFound { name: "Quantum".into(), available };

        assert_eq!(typo.to_string(), "Unknown decorator 'StepByStp'. Did you mean: StepByStep?");
        assert_eq!(prefix.to_string(), "Unknown decorator 'reason'. Did you mean: Reasoning?");
        assert_eq!(
            unrelated.to_string(),
            "Unknown decorator 'Quantum'. Available: StepByStep, Reasoning, Tone"
        );
    }

    #[test]
    fn not_found_message_without_catalog_is_bare() {
        let err = DecoratorError::NotFound { name: "X".into(), available: vec![] };
        assert_eq!(err.to_string(), "Unknown decorator 'X'");
    }

    #[test]
    fn edit_distance_counts_single_edits() {
        assert_eq!(edit_distance("tone", "tone"), 0);
        assert_eq!(edit_distance("tone", "tune"), 1);
        assert_eq!(edit_distance("tone", "ton"), 1);
        assert_eq!(edit_distance("concise", "cnocise"), 2);
    }

    #[test]
    fn serialization_failure_is_not_io() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err = AppError::from(json_err);

        assert!(matches!(err, AppError::Serialization(_)));
        assert!(err.to_string().starts_with("Failed to serialize output: "));
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn app_error_kind_maps_not_found() {
        let err = AppError::from(DecoratorError::NotFound { name: "X".into(), available: vec![] });
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
