use crate::domain::DecoratorError;
use crate::ports::{DefinitionSource, DocumentFormat, SourceDocument};

/// In-memory definition source for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryDefinitionSource {
    documents: Vec<SourceDocument>,
}

impl MemoryDefinitionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_yaml(mut self, origin: &str, content: &str) -> Self {
        self.documents.push(SourceDocument {
            origin: origin.to_string(),
            format: DocumentFormat::Yaml,
            content: content.to_string(),
        });
        self
    }

    pub fn with_json(mut self, origin: &str, content: &str) -> Self {
        self.documents.push(SourceDocument {
            origin: origin.to_string(),
            format: DocumentFormat::Json,
            content: content.to_string(),
        });
        self
    }
}

impl DefinitionSource for MemoryDefinitionSource {
    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }

    fn documents(&self) -> Result<Vec<SourceDocument>, DecoratorError> {
        Ok(self.documents.clone())
    }
}
