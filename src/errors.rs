//! Error types for indent-finder.

use std::path::PathBuf;

use crate::output::OutputError;
use crate::walker::WalkError;

/// Top-level error type for indent-finder operations.
#[derive(Debug, thiserror::Error)]
pub enum IndentError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("no files to analyse in {0}")]
    NoFilesFound(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

impl IndentError {
    /// Classify an IO failure on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => IndentError::PathNotFound(path),
            std::io::ErrorKind::PermissionDenied => IndentError::PermissionDenied(path),
            _ => IndentError::Io { path, source },
        }
    }
}

/// Map an error to its exit code.
pub fn exit_code(error: &IndentError) -> i32 {
    match error {
        IndentError::PathNotFound(_) => 3,
        IndentError::PermissionDenied(_) => 4,
        IndentError::NoFilesFound(_) => 5,
        IndentError::Io { .. } => 1,
        IndentError::Walk(_) => 2,
        IndentError::Output(_) => 1,
    }
}
