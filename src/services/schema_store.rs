//! Schema store - loads and indexes decorator definitions.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::schema_document::DefinitionDocument;
use crate::domain::validation::fold_name;
use crate::domain::{Definition, DecoratorError};
use crate::ports::{DecoratorCatalog, DefinitionSource, DocumentFormat, SourceDocument};

/// Read-only registry of decorator definitions.
///
/// Populated once by [`SchemaStore::load`]; exposes no mutating methods, so a
/// loaded store can be shared across threads freely.
#[derive(Debug, Default)]
pub struct SchemaStore {
    definitions: Vec<Definition>,
    by_name: HashMap<String, usize>,
    by_folded: HashMap<String, usize>,
}

impl SchemaStore {
    /// Load every document from one source.
    pub fn load(source: &dyn DefinitionSource) -> Result<Self, DecoratorError> {
        Self::load_from(&[source])
    }

    /// Load every document from each source in turn. Names must be unique
    /// across all sources.
    pub fn load_from(sources: &[&dyn DefinitionSource]) -> Result<Self, DecoratorError> {
        let mut documents = Vec::new();
        for source in sources {
            let docs = source.documents()?;
            debug!(source = %source.describe(), documents = docs.len(), "read definition source");
            documents.extend(docs);
        }
        Self::from_documents(documents)
    }

    /// Parse and index raw documents in the given order.
    pub fn from_documents(
        documents: impl IntoIterator<Item = SourceDocument>,
    ) -> Result<Self, DecoratorError> {
        let mut store = Self::default();

        for document in documents {
            let definition = parse_document(&document)?;
            let folded = fold_name(&definition.name);
            if let Some(&existing) = store.by_folded.get(&folded) {
                let existing = &store.definitions[existing];
                return Err(DecoratorError::schema(
                    &document.origin,
                    Some(&definition.name),
                    format!("duplicate decorator name (already defined in {})", existing.origin),
                ));
            }

            debug!(decorator = %definition.name, origin = %definition.origin, "loaded definition");
            let index = store.definitions.len();
            store.by_name.insert(definition.name.clone(), index);
            store.by_folded.insert(folded, index);
            store.definitions.push(definition);
        }

        info!(count = store.definitions.len(), "decorator registry loaded");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Distinct categories in load order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for definition in &self.definitions {
            if !categories.contains(&definition.category.as_str()) {
                categories.push(&definition.category);
            }
        }
        categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    fn lookup(&self, name: &str) -> Option<&Definition> {
        self.by_name
            .get(name)
            .or_else(|| self.by_folded.get(&fold_name(name)))
            .map(|&index| &self.definitions[index])
    }
}

fn parse_document(document: &SourceDocument) -> Result<Definition, DecoratorError> {
    let parsed: Result<DefinitionDocument, String> = match document.format {
        DocumentFormat::Yaml => serde_yaml::from_str(&document.content).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str(&document.content).map_err(|e| e.to_string()),
    };
    let parsed = parsed.map_err(|reason| DecoratorError::schema(&document.origin, None, reason))?;
    parsed.into_definition(&document.origin)
}

impl DecoratorCatalog for SchemaStore {
    fn get(&self, name: &str) -> Result<&Definition, DecoratorError> {
        self.lookup(name).ok_or_else(|| DecoratorError::NotFound {
            name: name.to_string(),
            available: self.definitions.iter().map(|d| d.name.clone()).collect(),
        })
    }

    fn list_by_category(&self, category: &str) -> Vec<&Definition> {
        self.definitions.iter().filter(|d| d.category.eq_ignore_ascii_case(category)).collect()
    }

    fn list_all(&self) -> Vec<&Definition> {
        self.definitions.iter().collect()
    }

    fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }
}
