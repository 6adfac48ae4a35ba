//! Built-in decorator catalog embedded at compile time.

use include_dir::{Dir, include_dir};

use crate::domain::DecoratorError;
use crate::ports::{DefinitionSource, DocumentFormat, SourceDocument};

/// Embedded registry directory, one definition per file, grouped by category.
static REGISTRY_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/registry");

const ORIGIN_SCHEME: &str = "builtin://";

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDefinitionSource;

impl EmbeddedDefinitionSource {
    pub fn new() -> Self {
        Self
    }
}

fn collect<'a>(dir: &'a Dir<'a>, out: &mut Vec<&'a include_dir::File<'a>>) {
    out.extend(dir.files());
    for child in dir.dirs() {
        collect(child, out);
    }
}

impl DefinitionSource for EmbeddedDefinitionSource {
    fn describe(&self) -> String {
        "builtin catalog".to_string()
    }

    fn documents(&self) -> Result<Vec<SourceDocument>, DecoratorError> {
        let mut files = Vec::new();
        collect(&REGISTRY_DIR, &mut files);
        files.sort_by(|a, b| a.path().cmp(b.path()));

        let mut documents = Vec::new();
        for file in files {
            let path = file.path().to_string_lossy().replace('\\', "/");
            let Some(format) = DocumentFormat::from_path(&path) else {
                continue;
            };
            let origin = format!("{}{}", ORIGIN_SCHEME, path);
            let content = file.contents_utf8().ok_or_else(|| {
                DecoratorError::schema(&origin, None, "definition is not valid UTF-8")
            })?;
            documents.push(SourceDocument { origin, format, content: content.to_string() });
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::DecoratorCatalog;
    use crate::services::SchemaStore;

    #[test]
    fn builtin_catalog_loads() {
        let store = SchemaStore::load(&EmbeddedDefinitionSource::new()).unwrap();

        assert!(store.len() >= 10);
        for name in ["StepByStep", "Reasoning", "Expert", "Tone", "Concise", "Detailed"] {
            assert!(store.contains(name), "builtin catalog should contain {name}");
        }
    }

    #[test]
    fn builtin_origins_use_scheme() {
        let documents = EmbeddedDefinitionSource::new().documents().unwrap();
        assert!(documents.iter().all(|d| d.origin.starts_with(ORIGIN_SCHEME)));
    }

    #[test]
    fn builtin_concise_conflicts_with_detailed() {
        let store = SchemaStore::load(&EmbeddedDefinitionSource::new()).unwrap();
        assert!(store.get("Concise").unwrap().conflicts_with("Detailed"));
    }
}
