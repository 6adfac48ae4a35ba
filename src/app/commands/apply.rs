//! Decorate annotated text.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::services::Decoration;

pub fn execute(ctx: &AppContext, text: &str, strict: bool) -> Result<Decoration, AppError> {
    Ok(ctx.decorator(strict)?.decorate(text)?)
}

/// Pretty-printed JSON form of an outcome.
pub fn to_json(outcome: &Decoration) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
