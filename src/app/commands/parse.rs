//! Show how annotated text is split into invocations and body.

use std::fmt::Write;

use crate::app::AppContext;
use crate::domain::{AppError, ParsedText};

pub fn execute(ctx: &AppContext, text: &str) -> Result<ParsedText, AppError> {
    Ok(ctx.parser()?.parse(text))
}

pub fn render(parsed: &ParsedText) -> String {
    let mut out = String::new();
    for invocation in &parsed.invocations {
        let params: Vec<String> =
            invocation.params.iter().map(|(key, value)| format!("{}={}", key, value)).collect();
        let _ = writeln!(
            out,
            "{}:{} {}({})",
            invocation.line,
            invocation.column,
            invocation.name,
            params.join(", ")
        );
    }
    for warning in &parsed.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    out.push_str("---\n");
    out.push_str(&parsed.body);
    out
}
