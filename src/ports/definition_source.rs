//! Definition source port.

use crate::domain::DecoratorError;

/// Serialization format of a definition document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Detect the format from a file name's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())?;
        match ext.as_str() {
            "yml" | "yaml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }
}

/// One raw definition document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Where the document came from (path or catalog entry), for diagnostics.
    pub origin: String,
    pub format: DocumentFormat,
    pub content: String,
}

/// Port for providers of raw decorator definition documents.
pub trait DefinitionSource {
    /// Short label for log output.
    fn describe(&self) -> String;

    /// All documents, in a stable load order.
    fn documents(&self) -> Result<Vec<SourceDocument>, DecoratorError>;
}
