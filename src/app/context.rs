use std::path::PathBuf;

use tracing::debug;

use crate::adapters::{EmbeddedDefinitionSource, FilesystemDefinitionSource};
use crate::domain::{AppError, InvocationParser};
use crate::ports::DefinitionSource;
use crate::services::{Decorator, SchemaStore};

use super::config::Config;

/// Loaded configuration plus the registry built from it.
#[derive(Debug)]
pub struct AppContext {
    config: Config,
    store: SchemaStore,
}

impl AppContext {
    /// Load the registry described by `config`: the built-in catalog (when
    /// enabled) followed by each configured directory.
    pub fn load(config: Config) -> Result<Self, AppError> {
        let embedded = EmbeddedDefinitionSource::new();
        let directories: Vec<FilesystemDefinitionSource> =
            config.registry.paths.iter().map(FilesystemDefinitionSource::new).collect();

        let mut sources: Vec<&dyn DefinitionSource> = Vec::new();
        if config.registry.builtin {
            sources.push(&embedded);
        }
        sources.extend(directories.iter().map(|s| s as &dyn DefinitionSource));
        debug!(sources = sources.len(), "loading decorator registry");

        let store = SchemaStore::load_from(&sources)?;
        Ok(Self { config, store })
    }

    /// Apply CLI overrides on top of a loaded config, then load.
    pub fn from_overrides(
        mut config: Config,
        registries: Vec<PathBuf>,
        no_builtin: bool,
    ) -> Result<Self, AppError> {
        config.registry.paths.extend(registries);
        if no_builtin {
            config.registry.builtin = false;
        }
        Self::load(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    pub fn parser(&self) -> Result<InvocationParser, AppError> {
        self.config.parser()
    }

    /// A decoration session configured from this context.
    pub fn decorator(&self, strict: bool) -> Result<Decorator<'_, SchemaStore>, AppError> {
        Ok(Decorator::new(&self.store)
            .with_parser(self.parser()?)
            .with_engine(self.config.engine())
            .strict(strict || self.config.policy.strict))
    }
}
