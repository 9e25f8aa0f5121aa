//! Directory expansion with gitignore support.
//!
//! Uses the `ignore` crate to list the files under a directory argument
//! while respecting .gitignore, .git/info/exclude, global gitignore, and
//! .indentignore.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::debug;

/// Name of the project-level ignore file looked up at the walk root.
pub const IGNORE_FILE: &str = ".indentignore";

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink loop detected: {path}")]
    SymlinkLoop { path: PathBuf },
}

/// Options for directory walking.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Maximum depth to recurse (None = unlimited).
    pub max_depth: Option<usize>,
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Include hidden files and directories.
    pub include_hidden: bool,
    /// Respect .gitignore patterns.
    pub respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_symlinks: false,
            include_hidden: false,
            respect_gitignore: true,
        }
    }
}

impl WalkOptions {
    /// Create options that include hidden files.
    pub fn with_hidden() -> Self {
        Self {
            include_hidden: true,
            ..Default::default()
        }
    }
}

/// List every regular file under `root`, sorted by path.
///
/// A `root` that is itself a file yields just that file.
///
/// # Examples
///
/// ```no_run
/// use indent_finder::walker::{collect_files, WalkOptions};
/// use std::path::Path;
///
/// for path in collect_files(Path::new("."), &WalkOptions::default()).unwrap() {
///     println!("{}", path.display());
/// }
/// ```
pub fn collect_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, WalkError> {
    if !root.exists() {
        return Err(WalkError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.include_hidden)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .follow_links(options.follow_symlinks)
        .max_depth(options.max_depth);

    let ignore_file = root.join(IGNORE_FILE);
    if ignore_file.exists() {
        builder.add_ignore(&ignore_file);
    }

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                if let Some(err) = convert_error(e) {
                    return Err(err);
                }
            }
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "collected files");
    Ok(files)
}

fn convert_error(error: ignore::Error) -> Option<WalkError> {
    match error {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => Some(io_error(path, io_err)),
            ignore::Error::Loop { child, .. } => Some(WalkError::SymlinkLoop { path: child }),
            _ => None,
        },
        ignore::Error::WithDepth { err, .. } => convert_error(*err),
        ignore::Error::Loop { child, .. } => Some(WalkError::SymlinkLoop { path: child }),
        ignore::Error::Io(io_err) => Some(io_error(PathBuf::from("<walk error>"), io_err)),
        // Skip non-IO errors (like gitignore parse errors)
        _ => None,
    }
}

fn io_error(path: PathBuf, source: std::io::Error) -> WalkError {
    if source.kind() == std::io::ErrorKind::PermissionDenied {
        WalkError::PermissionDenied { path }
    } else {
        WalkError::Io { path, source }
    }
}
