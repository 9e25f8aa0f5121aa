//! Line classification.
//!
//! Maps one line of text to a symbolic description of its leading
//! whitespace. Lines that carry no usable indentation signal (blank lines,
//! comment lines, garbled tab/space runs) classify to `None`.

use crate::accumulator::MAX_SPACES;

/// Indentation shape of a single significant line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClassification {
    /// No leading whitespace.
    NoIndent,
    /// Leading run made of tabs only.
    TabOnly(usize),
    /// Leading run of `MAX_SPACES` or more spaces.
    SpaceOnly(usize),
    /// Leading run of fewer than `MAX_SPACES` spaces. Could be either a
    /// space indented file or the first level of a mixed one.
    BeginSpace(usize),
    /// One or more tabs followed by fewer than `MAX_SPACES` spaces.
    Mixed { tabs: usize, spaces: usize },
}

impl LineClassification {
    /// Length of the leading run, with `Mixed` lines counting characters
    /// rather than columns.
    pub fn prefix_len(&self) -> usize {
        match *self {
            Self::NoIndent => 0,
            Self::TabOnly(n) | Self::SpaceOnly(n) | Self::BeginSpace(n) => n,
            Self::Mixed { tabs, spaces } => tabs + spaces,
        }
    }
}

/// Classify the leading whitespace of `line`.
///
/// `line` should not carry its line terminator.
///
/// # Examples
///
/// ```
/// use indent_finder::classify::{classify, LineClassification};
///
/// assert_eq!(classify("    x"), Some(LineClassification::BeginSpace(4)));
/// assert_eq!(classify("\t\t  x"), Some(LineClassification::Mixed { tabs: 2, spaces: 2 }));
/// assert_eq!(classify("   "), None);
/// ```
pub fn classify(line: &str) -> Option<LineClassification> {
    let first = line.chars().next()?;
    if !is_indent_char(first) {
        return Some(LineClassification::NoIndent);
    }

    let split = line
        .find(|c: char| !is_indent_char(c))
        .unwrap_or(line.len());
    let (indent_part, text_part) = line.split_at(split);

    if text_part.is_empty() || is_comment_start(text_part) {
        return None;
    }

    let tabs = indent_part.bytes().take_while(|&b| b == b'\t').count();
    let spaces = indent_part.len() - tabs;

    if tabs > 0 && spaces > 0 {
        // Only "\t+ +" is accepted; a tab after a space is garbage.
        if indent_part[tabs..].contains('\t') || spaces >= MAX_SPACES {
            return None;
        }
        return Some(LineClassification::Mixed { tabs, spaces });
    }

    if tabs > 0 {
        Some(LineClassification::TabOnly(tabs))
    } else if indent_part.contains('\t') {
        None
    } else if spaces < MAX_SPACES {
        Some(LineClassification::BeginSpace(spaces))
    } else {
        Some(LineClassification::SpaceOnly(spaces))
    }
}

fn is_indent_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// `#`, `/*` and `*` mark comment lines, which are often aligned rather
/// than indented.
fn is_comment_start(text: &str) -> bool {
    text.starts_with('*') || text.starts_with("/*") || text.starts_with('#')
}
