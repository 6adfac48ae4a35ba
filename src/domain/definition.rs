//! Immutable decorator definitions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::ParamValue;

/// Declared type of a parameter together with its type-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Array,
    Enum {
        #[serde(rename = "enum")]
        allowed: Vec<String>,
    },
}

impl ParameterKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterKind::String => "string",
            ParameterKind::Number { .. } => "number",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Array => "array",
            ParameterKind::Enum { .. } => "enum",
        }
    }
}

/// One declared parameter of a decorator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ParameterKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a directive block is placed relative to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Prepend,
    Append,
    Replace,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Placement::Prepend => "prepend",
            Placement::Append => "append",
            Placement::Replace => "replace",
        };
        write!(f, "{}", name)
    }
}

/// How a directive block combines with earlier blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionBehavior {
    #[default]
    Accumulate,
    Override,
}

impl fmt::Display for CompositionBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompositionBehavior::Accumulate => "accumulate",
            CompositionBehavior::Override => "override",
        };
        write!(f, "{}", name)
    }
}

/// Fragment rules for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterMapping {
    /// Fragment keyed by the validated value's string form.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub value_map: BTreeMap<String, String>,
    /// Fragment with `{value}` replaced by the value's display form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationTemplate {
    pub instruction: String,
    pub parameter_mapping: BTreeMap<String, ParameterMapping>,
    pub placement: Placement,
    pub composition_behavior: CompositionBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Compatibility {
    pub conflicts: Vec<String>,
    pub requires: Vec<String>,
}

/// The immutable schema of one decorator.
///
/// Only the schema store constructs definitions; everything else borrows them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub name: String,
    pub category: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Vec<ParameterSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation_template: Option<TransformationTemplate>,
    pub compatibility: Compatibility,
    #[serde(skip)]
    pub origin: String,
}

impl Definition {
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn placement(&self) -> Option<Placement> {
        self.transformation_template.as_ref().map(|t| t.placement)
    }

    pub fn composition_behavior(&self) -> CompositionBehavior {
        self.transformation_template.as_ref().map(|t| t.composition_behavior).unwrap_or_default()
    }

    /// Whether this definition lists `other` (case-insensitively) as a conflict.
    pub fn conflicts_with(&self, other: &str) -> bool {
        self.compatibility.conflicts.iter().any(|c| c.eq_ignore_ascii_case(other))
    }

    pub fn is_noop(&self) -> bool {
        self.transformation_template.is_none()
    }
}
