mod embedded_definition_source;
mod filesystem_definition_source;
mod memory_definition_source;

pub use embedded_definition_source::EmbeddedDefinitionSource;
pub use filesystem_definition_source::FilesystemDefinitionSource;
pub use memory_definition_source::MemoryDefinitionSource;
