//! Output formatting for indent-finder.
//!
//! Renders verdicts as plain text, as vim `set` commands ready to be
//! executed by an editor, or as JSON for programmatic access.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::driver::FileReport;
use crate::resolve::Verdict;

/// Errors that can occur during output formatting.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `space 4`, `tab 8`, `mixed tab 8 space 4`.
    #[default]
    Plain,
    /// vim `set` commands.
    Vim,
    /// JSON array of per-file results.
    Json,
}

/// Render a verdict as vim settings.
///
/// Tab indented files use `default_tab_width` for both tabstop and
/// shiftwidth.
///
/// # Examples
///
/// ```
/// use indent_finder::output::vim_output;
/// use indent_finder::resolve::Verdict;
///
/// assert_eq!(
///     vim_output(&Verdict::Space { width: 2 }, 8),
///     "set softtabstop=2 | set tabstop=2 | set expandtab | set shiftwidth=2 \" (space 2)"
/// );
/// ```
pub fn vim_output(verdict: &Verdict, default_tab_width: usize) -> String {
    match *verdict {
        Verdict::Space { width } => format!(
            "set softtabstop={w} | set tabstop={w} | set expandtab | set shiftwidth={w} \" (space {w})",
            w = width
        ),
        Verdict::Tab { .. } => format!(
            "set softtabstop=0 | set tabstop={w} | set noexpandtab | set shiftwidth={w} \" (tab)",
            w = default_tab_width
        ),
        Verdict::Mixed {
            tab_width,
            space_width,
        } => format!(
            "set softtabstop=0 | set tabstop={} | set noexpandtab | set shiftwidth={s} \" (mixed {s})",
            tab_width,
            s = space_width
        ),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    indent: Option<&'a Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Render reports as a pretty JSON array.
pub fn format_json(reports: &[FileReport]) -> Result<String, OutputError> {
    let entries: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|report| match &report.result {
            Ok(verdict) => JsonReport {
                path: &report.path,
                indent: Some(verdict),
                error: None,
            },
            Err(e) => JsonReport {
                path: &report.path,
                indent: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Render one successful report as a line of text.
///
/// With `with_path`, the line is prefixed by `"<path> : "` so that
/// several files can share one output stream.
pub fn format_line(
    path: &Path,
    verdict: &Verdict,
    format: OutputFormat,
    default_tab_width: usize,
    with_path: bool,
) -> String {
    let body = match format {
        OutputFormat::Vim => vim_output(verdict, default_tab_width),
        OutputFormat::Plain | OutputFormat::Json => verdict.to_string(),
    };
    if with_path {
        format!("{} : {}", path.display(), body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IndentError;
    use std::path::PathBuf;

    const TAB_WIDTH: usize = 13;

    #[test]
    fn test_vim_space() {
        assert_eq!(
            vim_output(&Verdict::Space { width: 4 }, TAB_WIDTH),
            "set softtabstop=4 | set tabstop=4 | set expandtab | set shiftwidth=4 \" (space 4)"
        );
    }

    #[test]
    fn test_vim_tab_uses_default_width() {
        assert_eq!(
            vim_output(&Verdict::Tab { width: 8 }, TAB_WIDTH),
            "set softtabstop=0 | set tabstop=13 | set noexpandtab | set shiftwidth=13 \" (tab)"
        );
    }

    #[test]
    fn test_vim_mixed() {
        let verdict = Verdict::Mixed {
            tab_width: 8,
            space_width: 4,
        };
        assert_eq!(
            vim_output(&verdict, TAB_WIDTH),
            "set softtabstop=0 | set tabstop=8 | set noexpandtab | set shiftwidth=4 \" (mixed 4)"
        );
    }

    #[test]
    fn test_format_line() {
        let path = Path::new("src/a.c");
        let verdict = Verdict::Tab { width: 8 };
        assert_eq!(format_line(path, &verdict, OutputFormat::Plain, 8, false), "tab 8");
        assert_eq!(
            format_line(path, &verdict, OutputFormat::Plain, 8, true),
            "src/a.c : tab 8"
        );
    }

    #[test]
    fn test_format_json() {
        let reports = vec![
            FileReport {
                path: PathBuf::from("a.py"),
                result: Ok(Verdict::Space { width: 4 }),
            },
            FileReport {
                path: PathBuf::from("gone.py"),
                result: Err(IndentError::PathNotFound(PathBuf::from("gone.py"))),
            },
        ];

        let json = format_json(&reports).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = v.as_array().unwrap();

        assert_eq!(entries[0]["path"], "a.py");
        assert_eq!(entries[0]["indent"]["type"], "space");
        assert_eq!(entries[0]["indent"]["width"], 4);
        assert!(entries[0].get("error").is_none());

        assert_eq!(entries[1]["error"], "path not found: gone.py");
        assert!(entries[1].get("indent").is_none());
    }
}
