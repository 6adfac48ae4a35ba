//! Validate the configured registry.

use crate::app::AppContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub decorators: usize,
    pub categories: Vec<String>,
}

/// Loading the context already validated every definition; summarize it.
pub fn execute(ctx: &AppContext) -> CheckReport {
    let store = ctx.store();
    CheckReport {
        decorators: store.len(),
        categories: store.categories().into_iter().map(str::to_string).collect(),
    }
}
