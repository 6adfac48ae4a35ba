//! Raw definition documents and their conversion into validated definitions.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

use super::definition::{
    Compatibility, CompositionBehavior, Definition, ParameterKind, ParameterMapping,
    ParameterSpec, Placement, TransformationTemplate,
};
use super::error::DecoratorError;
use super::validation::validate_identifier;
use super::value::ParamValue;

const DEFAULT_CATEGORY: &str = "general";
const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DefinitionDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
    #[serde(default)]
    pub transformation_template: Option<TemplateDocument>,
    #[serde(default)]
    pub compatibility: CompatibilityDocument,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(rename = "enum", default)]
    pub allowed: Option<Vec<String>>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplateDocument {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub parameter_mapping: BTreeMap<String, ParameterMapping>,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub composition_behavior: CompositionBehavior,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompatibilityDocument {
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
}

impl DefinitionDocument {
    /// Check the document and convert it into an immutable definition.
    pub fn into_definition(self, origin: &str) -> Result<Definition, DecoratorError> {
        let name = match self.name.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(DecoratorError::schema(origin, None, "missing decorator name"));
            }
            Some(name) => name.to_string(),
        };
        if !validate_identifier(&name) {
            return Err(DecoratorError::schema(
                origin,
                Some(&name),
                "name must contain only letters, digits, or underscores",
            ));
        }
        let fail = |reason: String| DecoratorError::schema(origin, Some(&name), reason);

        let mut seen = HashSet::new();
        let mut parameters = Vec::with_capacity(self.parameters.len());
        for (index, doc) in self.parameters.into_iter().enumerate() {
            let spec = doc.into_spec(index).map_err(&fail)?;
            if !seen.insert(spec.name.clone()) {
                return Err(fail(format!("duplicate parameter '{}'", spec.name)));
            }
            parameters.push(spec);
        }

        let transformation_template = match self.transformation_template {
            Some(template) => Some(template.into_template(&parameters).map_err(&fail)?),
            None => None,
        };

        let compatibility = Compatibility {
            conflicts: self.compatibility.conflicts,
            requires: self.compatibility.requires,
        };
        for entry in compatibility.conflicts.iter().chain(&compatibility.requires) {
            if !validate_identifier(entry) {
                return Err(fail(format!("invalid decorator name '{}' in compatibility", entry)));
            }
        }

        Ok(Definition {
            name,
            category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: self.description,
            parameters,
            transformation_template,
            compatibility,
            origin: origin.to_string(),
        })
    }
}

impl ParameterDocument {
    fn into_spec(self, index: usize) -> Result<ParameterSpec, String> {
        let name = match self.name {
            Some(name) if validate_identifier(&name) => name,
            Some(name) => return Err(format!("invalid parameter name '{}'", name)),
            None => return Err(format!("parameter #{} has no name", index + 1)),
        };

        let kind_name = self.kind.as_deref();
        if self.allowed.is_some() && kind_name != Some("enum") {
            return Err(format!("parameter '{}' declares 'enum' values but is not an enum", name));
        }
        if (self.min.is_some() || self.max.is_some()) && kind_name != Some("number") {
            return Err(format!("parameter '{}' declares 'min'/'max' but is not a number", name));
        }

        let kind = match kind_name {
            Some("string") => ParameterKind::String,
            Some("boolean") => ParameterKind::Boolean,
            Some("array") => ParameterKind::Array,
            Some("number") => {
                if let (Some(min), Some(max)) = (self.min, self.max) {
                    if min > max {
                        return Err(format!(
                            "parameter '{}' has min {} greater than max {}",
                            name, min, max
                        ));
                    }
                }
                ParameterKind::Number { min: self.min, max: self.max }
            }
            Some("enum") => match self.allowed {
                Some(allowed) if !allowed.is_empty() => ParameterKind::Enum { allowed },
                _ => return Err(format!("enum parameter '{}' declares no allowed values", name)),
            },
            Some(other) => {
                return Err(format!("parameter '{}' has unsupported type '{}'", name, other));
            }
            None => return Err(format!("parameter '{}' has no type", name)),
        };

        let default = match self.default {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                convert_default(&kind, &value)
                    .map_err(|reason| format!("parameter '{}' default {}", name, reason))?,
            ),
        };

        Ok(ParameterSpec { name, kind, required: self.required, default, description: self.description })
    }
}

fn convert_default(kind: &ParameterKind, value: &Value) -> Result<ParamValue, String> {
    match (kind, value) {
        (ParameterKind::String, Value::String(s)) => Ok(ParamValue::String(s.clone())),
        (ParameterKind::Boolean, Value::Bool(b)) => Ok(ParamValue::Boolean(*b)),
        (ParameterKind::Number { min, max }, Value::Number(n)) => {
            let n = n.as_f64().ok_or_else(|| "is not a finite number".to_string())?;
            if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) {
                return Err(format!("{} lies outside the declared bounds", n));
            }
            Ok(ParamValue::Number(n))
        }
        (ParameterKind::Enum { allowed }, Value::String(s)) => {
            if allowed.contains(s) {
                Ok(ParamValue::Enum(s.clone()))
            } else {
                Err(format!("'{}' is not one of: {}", s, allowed.join(", ")))
            }
        }
        (ParameterKind::Array, Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(_) | Value::Bool(_) => Ok(item.to_string()),
                _ => Err("must be a list of scalars".to_string()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::Array),
        (kind, _) => Err(format!("does not match type '{}'", kind.type_name())),
    }
}

impl TemplateDocument {
    fn into_template(self, parameters: &[ParameterSpec]) -> Result<TransformationTemplate, String> {
        for key in self.parameter_mapping.keys() {
            if !parameters.iter().any(|p| &p.name == key) {
                return Err(format!("parameterMapping refers to undeclared parameter '{}'", key));
            }
        }

        let env = minijinja::Environment::new();
        let template = env
            .template_from_str(&self.instruction)
            .map_err(|err| format!("instruction template does not compile: {}", err))?;
        let mut undeclared: Vec<_> = template
            .undeclared_variables(false)
            .into_iter()
            .filter(|var| !parameters.iter().any(|p| &p.name == var))
            .collect();
        undeclared.sort();
        if let Some(var) = undeclared.first() {
            return Err(format!("instruction references undeclared parameter '{}'", var));
        }

        Ok(TransformationTemplate {
            instruction: self.instruction,
            parameter_mapping: self.parameter_mapping,
            placement: self.placement,
            composition_behavior: self.composition_behavior,
        })
    }
}
