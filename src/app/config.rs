//! Configuration loaded from `prompt-decorators.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    AppError, DEFAULT_MARKER, DEFAULT_SEPARATOR, InvocationParser, TransformationEngine,
};

pub const CONFIG_FILE_NAME: &str = "prompt-decorators.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PROMPT_DECORATORS_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Three-character invocation marker.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { marker: default_marker() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Text placed between a directive block and the prompt.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { separator: default_separator() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Load the catalog compiled into the binary.
    #[serde(default = "default_true")]
    pub builtin: bool,
    /// Extra definition directories, loaded after the built-in catalog.
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { builtin: true, paths: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Fail on unknown decorators and invalid parameters instead of skipping.
    #[serde(default)]
    pub strict: bool,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Relative registry paths resolve against the
    /// file's directory.
    pub fn load_file(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config = Self::parse(&content)?;

        if let Some(base) = path.parent() {
            for entry in &mut config.registry.paths {
                if entry.is_relative() {
                    *entry = base.join(&*entry);
                }
            }
        }
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Locate and load the active configuration.
    ///
    /// Precedence: `explicit`, then `PROMPT_DECORATORS_CONFIG`, then
    /// `prompt-decorators.toml` in `cwd`. Without any file the defaults apply.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::load_file(Path::new(&path));
        }
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load_file(&local);
        }
        debug!("no configuration file found; using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), AppError> {
        self.parser()?;
        if self.engine.separator.is_empty() {
            return Err(AppError::config_error("engine.separator must not be empty"));
        }
        Ok(())
    }

    pub fn parser(&self) -> Result<InvocationParser, AppError> {
        InvocationParser::with_marker(&self.parser.marker)
    }

    pub fn engine(&self) -> TransformationEngine {
        TransformationEngine::with_separator(self.engine.separator.clone())
    }
}
