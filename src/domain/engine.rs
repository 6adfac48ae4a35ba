//! Renders directive blocks and merges them into prompts.

use minijinja::{Environment, UndefinedBehavior};

use super::definition::Placement;
use super::error::DecoratorError;
use super::instance::Instance;

pub const DEFAULT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct TransformationEngine {
    separator: String,
}

impl Default for TransformationEngine {
    fn default() -> Self {
        Self { separator: DEFAULT_SEPARATOR.to_string() }
    }
}

impl TransformationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self { separator: separator.into() }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Render the directive block of `instance`.
    ///
    /// Returns `None` for a definition without a transformation template.
    pub fn render_directive(&self, instance: &Instance<'_>) -> Result<Option<String>, DecoratorError> {
        let Some(template) = &instance.definition().transformation_template else {
            return Ok(None);
        };

        let mut directive = render_instruction(instance, &template.instruction)?;

        for bound in instance.params() {
            let (Some(mapping), Some(value)) =
                (template.parameter_mapping.get(&bound.name), bound.value.as_ref())
            else {
                continue;
            };
            let fragments = [
                mapping.value_map.get(&value.key()).cloned(),
                mapping.format.as_ref().map(|format| format.replace("{value}", &value.to_string())),
            ];
            for fragment in fragments.into_iter().flatten() {
                let fragment = fragment.trim();
                if fragment.is_empty() {
                    continue;
                }
                if !directive.is_empty() {
                    directive.push(' ');
                }
                directive.push_str(fragment);
            }
        }

        Ok(Some(directive))
    }

    /// Combine `directive` with `prompt` according to `placement`.
    pub fn combine(&self, directive: &str, prompt: &str, placement: Placement) -> String {
        match placement {
            Placement::Prepend => format!("{}{}{}", directive, self.separator, prompt),
            Placement::Append => format!("{}{}{}", prompt, self.separator, directive),
            Placement::Replace => directive.to_string(),
        }
    }

    /// Apply one instance to `prompt`, returning the transformed prompt.
    pub fn apply(&self, instance: &Instance<'_>, prompt: &str) -> Result<String, DecoratorError> {
        match (self.render_directive(instance)?, instance.definition().placement()) {
            (Some(directive), Some(placement)) => Ok(self.combine(&directive, prompt, placement)),
            _ => Ok(prompt.to_string()),
        }
    }
}

fn render_instruction(instance: &Instance<'_>, instruction: &str) -> Result<String, DecoratorError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let context: std::collections::BTreeMap<&str, minijinja::Value> = instance
        .params()
        .iter()
        .filter_map(|p| p.value.as_ref().map(|v| (p.name.as_str(), v.to_template_value())))
        .collect();

    let rendered = env.render_str(instruction, context).map_err(|err| DecoratorError::Template {
        decorator: instance.name().to_string(),
        reason: err.to_string(),
    })?;
    Ok(rendered.trim().to_string())
}
