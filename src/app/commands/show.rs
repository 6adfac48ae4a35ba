//! Describe a single decorator.

use std::fmt::Write;

use crate::app::AppContext;
use crate::domain::{AppError, Definition, ParameterKind};
use crate::ports::DecoratorCatalog;

pub fn execute<'a>(ctx: &'a AppContext, name: &str) -> Result<&'a Definition, AppError> {
    Ok(ctx.store().get(name)?)
}

pub fn render(definition: &Definition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} v{} [{}]", definition.name, definition.version, definition.category);
    if let Some(description) = &definition.description {
        let _ = writeln!(out, "  {}", description);
    }

    if !definition.parameters.is_empty() {
        out.push_str("\nParameters:\n");
    }
    for spec in &definition.parameters {
        let mut line = format!("  {} ({})", spec.name, spec.kind.type_name());
        match &spec.kind {
            ParameterKind::Enum { allowed } => {
                let _ = write!(line, " one of: {}", allowed.join(", "));
            }
            ParameterKind::Number { min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    let _ = write!(line, " in [{}, {}]", min, max);
                }
                (Some(min), None) => {
                    let _ = write!(line, " >= {}", min);
                }
                (None, Some(max)) => {
                    let _ = write!(line, " <= {}", max);
                }
                (None, None) => {}
            },
            _ => {}
        }
        if spec.required {
            line.push_str(", required");
        }
        if let Some(default) = &spec.default {
            let _ = write!(line, ", default {}", default);
        }
        let _ = writeln!(out, "{}", line);
        if let Some(description) = &spec.description {
            let _ = writeln!(out, "      {}", description);
        }
    }

    match definition.placement() {
        Some(placement) => {
            let _ = writeln!(
                out,
                "\nPlacement: {}, composition: {}",
                placement,
                definition.composition_behavior()
            );
        }
        None => out.push_str("\nNo transformation (no-op)\n"),
    }

    let compatibility = &definition.compatibility;
    if !compatibility.conflicts.is_empty() {
        let _ = writeln!(out, "Conflicts with: {}", compatibility.conflicts.join(", "));
    }
    if !compatibility.requires.is_empty() {
        let _ = writeln!(out, "Requires: {}", compatibility.requires.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;

    #[test]
    fn renders_parameters_and_compatibility() {
        let ctx = AppContext::load(Config::default()).unwrap();
        let rendered = render(execute(&ctx, "concise").unwrap());

        assert!(rendered.starts_with("Concise v1.0.0 [verbosity]\n"));
        assert!(rendered.contains("  maxWords (number) in [10, 2000]\n"));
        assert!(rendered.contains("  bulleted (boolean), default false\n"));
        assert!(rendered.contains("Placement: prepend, composition: accumulate"));
        assert!(rendered.contains("Conflicts with: Detailed"));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let ctx = AppContext::load(Config::default()).unwrap();
        let err = execute(&ctx, "Nope").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
