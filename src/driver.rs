//! File-level analysis.
//!
//! Reads files, applies the per-language policies and feeds each line into a
//! fresh [`IndentFinder`]. Many files can be analysed at once with
//! [`analyze_paths`]; every file still gets its own finder.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::accumulator::IndentFinder;
use crate::errors::IndentError;
use crate::resolve::{Verdict, DEFAULT_TAB_WIDTH};

/// Bytes read from the head of each file by default.
pub const MAX_BYTES: usize = 100_000;

/// Extensions whose indentation is not worth guessing.
const BLACKLISTED_EXTENSIONS: &[&str] = &["rst"];

/// Line ending that shows real code has started, per extension. Files that
/// never reach it (a header full of declarations, say) fall back to the
/// default result.
const PRE_INDENTATION_MARKERS: &[(&str, char)] = &[
    ("C", '{'),
    ("c", '{'),
    ("cc", '{'),
    ("cpp", '{'),
    ("h", '{'),
    ("hpp", '{'),
    ("py", ':'),
];

/// Settings shared by every analysed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Width reported for tab indented files.
    pub default_tab_width: usize,
    /// Verdict returned when the evidence is inconclusive.
    pub default_result: Verdict,
    /// Only the first `max_bytes` of each file are read.
    pub max_bytes: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            default_tab_width: DEFAULT_TAB_WIDTH,
            default_result: Verdict::default(),
            max_bytes: MAX_BYTES,
        }
    }
}

impl AnalysisOptions {
    /// Fall back to tabs instead of spaces when nothing can be decided.
    pub fn default_to_tabs(mut self) -> Self {
        self.default_result = Verdict::Tab {
            width: self.default_tab_width,
        };
        self
    }
}

/// Analysis outcome for one path.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<Verdict, IndentError>,
}

/// Analyse in-memory text. No language policy applies.
///
/// # Examples
///
/// ```
/// use indent_finder::driver::{analyze_str, AnalysisOptions};
/// use indent_finder::resolve::Verdict;
///
/// let text = "int f() {\n\tif (x) {\n\t\ty();\n\t}\n}\n";
/// let verdict = analyze_str(text, &AnalysisOptions::default());
/// assert_eq!(verdict, Verdict::Tab { width: 8 });
/// ```
pub fn analyze_str(text: &str, options: &AnalysisOptions) -> Verdict {
    let mut finder = IndentFinder::new();
    for line in split_lines(text) {
        finder.ingest(line);
    }
    finder.verdict(options.default_tab_width, options.default_result)
}

/// Analyse one file.
pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<Verdict, IndentError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let extension = path.extension().and_then(|e| e.to_str());

    if file_name.eq_ignore_ascii_case("makefile") || extension == Some("mk") {
        debug!(path = %path.display(), "makefile, assuming tabs");
        return Ok(Verdict::Tab {
            width: options.default_tab_width,
        });
    }

    if extension.is_some_and(|ext| BLACKLISTED_EXTENSIONS.contains(&ext)) {
        debug!(path = %path.display(), "blacklisted extension, using default");
        return Ok(options.default_result);
    }

    let marker = extension.and_then(|ext| {
        PRE_INDENTATION_MARKERS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|&(_, m)| m)
    });

    let text = read_head(path, options.max_bytes)?;

    let mut finder = IndentFinder::new();
    let mut found_marker = false;
    for line in split_lines(&text) {
        finder.ingest(line);
        if let Some(m) = marker {
            found_marker = found_marker || line.trim_end().ends_with(m);
        }
    }

    if marker.is_some() && !found_marker {
        debug!(path = %path.display(), "code start marker not found, using default");
        return Ok(options.default_result);
    }

    let verdict = finder.verdict(options.default_tab_width, options.default_result);
    debug!(
        path = %path.display(),
        lines = finder.lines_processed(),
        hints = finder.indent_hints(),
        %verdict,
        "analysed"
    );
    Ok(verdict)
}

/// Analyse several files in parallel. Reports keep the order of `paths`.
pub fn analyze_paths(paths: &[PathBuf], options: &AnalysisOptions) -> Vec<FileReport> {
    paths
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            result: analyze_file(path, options),
        })
        .collect()
}

/// Read at most `max_bytes` from `path`, replacing invalid UTF-8.
fn read_head(path: &Path, max_bytes: usize) -> Result<String, IndentError> {
    let file = File::open(path).map_err(|e| IndentError::from_io(path, e))?;
    let mut bytes = Vec::new();
    file.take(max_bytes as u64)
        .read_to_end(&mut bytes)
        .map_err(|e| IndentError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split on `\n`, `\r\n`, lone `\r`, and the other Unicode line
/// boundaries (form feed, vertical tab, file/group/record separators, NEL,
/// line and paragraph separators). A `^L` page break is a blank line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split(is_line_boundary))
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
