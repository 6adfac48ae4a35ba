mod decorator_catalog;
mod definition_source;

pub use decorator_catalog::DecoratorCatalog;
pub use definition_source::{DefinitionSource, DocumentFormat, SourceDocument};
