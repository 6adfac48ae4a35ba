//! Table-driven parameter validation.
//!
//! One routine serves every decorator: the parameter specs of a definition
//! drive type coercion, bounds checks and default substitution.

use super::definition::{Definition, ParameterKind, ParameterSpec};
use super::error::{ValidationError, ValidationRule};
use super::instance::BoundParameter;
use super::value::{ParamValue, RawValue};

/// Validate and coerce one raw value against its spec.
pub fn validate_value(
    decorator: &str,
    spec: &ParameterSpec,
    raw: &RawValue,
) -> Result<ParamValue, ValidationError> {
    let fail = |rule| ValidationError {
        decorator: decorator.to_string(),
        parameter: spec.name.clone(),
        rule,
    };

    let text = match (&spec.kind, raw) {
        (ParameterKind::Array, RawValue::List(items)) => return Ok(ParamValue::Array(items.clone())),
        (ParameterKind::Array, RawValue::Scalar(text)) => {
            return Ok(ParamValue::Array(split_list(text)));
        }
        (_, RawValue::List(_)) => return Err(fail(ValidationRule::ExpectedScalar)),
        (_, RawValue::Scalar(text)) => text,
    };

    match &spec.kind {
        ParameterKind::String | ParameterKind::Array => Ok(ParamValue::String(text.clone())),
        ParameterKind::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(ParamValue::Boolean(true)),
            "false" => Ok(ParamValue::Boolean(false)),
            _ => Err(fail(ValidationRule::NotBoolean { value: text.clone() })),
        },
        ParameterKind::Number { min, max } => {
            let value = parse_number(text)
                .ok_or_else(|| fail(ValidationRule::NotNumber { value: text.clone() }))?;
            if let Some(min) = *min {
                if value < min {
                    return Err(fail(ValidationRule::BelowMinimum { value, min }));
                }
            }
            if let Some(max) = *max {
                if value > max {
                    return Err(fail(ValidationRule::AboveMaximum { value, max }));
                }
            }
            Ok(ParamValue::Number(value))
        }
        ParameterKind::Enum { allowed } => {
            if allowed.iter().any(|a| a == text) {
                Ok(ParamValue::Enum(text.clone()))
            } else {
                Err(fail(ValidationRule::NotInEnum { value: text.clone(), allowed: allowed.clone() }))
            }
        }
    }
}

/// Validate a raw parameter map against every spec of `definition`, in
/// declaration order, stopping at the first failure.
///
/// Required specs missing from `raw` fail; optional ones take their default
/// as-is. Raw keys naming no spec are reported after all specs pass, in
/// source order.
pub fn bind_parameters(
    definition: &Definition,
    raw: &[(String, RawValue)],
) -> Result<Vec<BoundParameter>, ValidationError> {
    let mut bound = Vec::with_capacity(definition.parameters.len());

    for spec in &definition.parameters {
        let value = match raw.iter().find(|(key, _)| key == &spec.name) {
            Some((_, raw_value)) => Some(validate_value(&definition.name, spec, raw_value)?),
            None if spec.required => {
                return Err(ValidationError {
                    decorator: definition.name.clone(),
                    parameter: spec.name.clone(),
                    rule: ValidationRule::Missing,
                });
            }
            None => spec.default.clone(),
        };
        bound.push(BoundParameter { name: spec.name.clone(), value });
    }

    if let Some((key, _)) = raw.iter().find(|(key, _)| definition.parameter(key).is_none()) {
        return Err(ValidationError {
            decorator: definition.name.clone(),
            parameter: key.clone(),
            rule: ValidationRule::Unknown,
        });
    }

    Ok(bound)
}

fn parse_number(text: &str) -> Option<f64> {
    let looks_numeric = !text.is_empty()
        && text.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_numeric {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
