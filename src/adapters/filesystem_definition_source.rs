//! Definition documents read from a directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::DecoratorError;
use crate::ports::{DefinitionSource, DocumentFormat, SourceDocument};

/// Reads every `.yml`, `.yaml` and `.json` file below `root`, sorted by path.
#[derive(Debug, Clone)]
pub struct FilesystemDefinitionSource {
    root: PathBuf,
}

impl FilesystemDefinitionSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DecoratorError {
    DecoratorError::schema(path.display().to_string(), None, err.to_string())
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DecoratorError> {
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        // `file_type` does not follow symlinks, so linked directories are never walked.
        let file_type = entry.file_type().map_err(|e| io_error(&path, e))?;
        if file_type.is_dir() {
            collect(&path, out)?;
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            out.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-file registry entry");
        }
    }
    Ok(())
}

impl DefinitionSource for FilesystemDefinitionSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn documents(&self) -> Result<Vec<SourceDocument>, DecoratorError> {
        let mut paths = Vec::new();
        if self.root.is_file() {
            paths.push(self.root.clone());
        } else {
            collect(&self.root, &mut paths)?;
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            let origin = path.display().to_string();
            let Some(format) = DocumentFormat::from_path(&origin) else {
                continue;
            };
            let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            documents.push(SourceDocument { origin, format, content });
        }
        Ok(documents)
    }
}
