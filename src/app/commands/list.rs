//! List available decorators.

use serde::Serialize;

use crate::app::AppContext;
use crate::ports::DecoratorCatalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratorSummary {
    pub name: String,
    pub category: String,
    pub version: String,
    pub description: Option<String>,
}

pub fn execute(ctx: &AppContext, category: Option<&str>) -> Vec<DecoratorSummary> {
    let store = ctx.store();
    let definitions = match category {
        Some(category) => store.list_by_category(category),
        None => store.list_all(),
    };
    definitions
        .into_iter()
        .map(|d| DecoratorSummary {
            name: d.name.clone(),
            category: d.category.clone(),
            version: d.version.clone(),
            description: d.description.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;

    #[test]
    fn filters_by_category() {
        let ctx = AppContext::load(Config::default()).unwrap();

        let all = execute(&ctx, None);
        let verbosity = execute(&ctx, Some("Verbosity"));

        assert!(all.len() > verbosity.len());
        let names: Vec<_> = verbosity.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Concise", "Detailed"]);
        assert!(execute(&ctx, Some("unknown")).is_empty());
    }
}
