pub mod apply;
pub mod check;
pub mod list;
pub mod parse;
pub mod show;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::domain::AppError;

/// Read annotated text from `path`, or stdin when absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|e| {
            AppError::Io(io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        }),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
