//! Turning accumulated counters into a verdict.
//!
//! 1. Space indented file
//!    - short space runs fill both the space and mixed counters
//!    - runs of `MAX_SPACES` or more fill only the space counters
//!    - almost no tab evidence
//!
//! 2. Tab indented file
//!    - tab evidence dominates both other kinds
//!
//! 3. Mixed tab/space file (tab is 8 columns, spaces fill the rest)
//!    - mixed evidence equal to or above tab evidence, and above space
//!
//! A file whose indentation never exceeds `MAX_SPACES` columns cannot be told
//! apart from a space indented one, and resolves as spaces.

use std::fmt;

use serde::Serialize;

use crate::accumulator::{Bucket, IndentCounts, IndentFinder, MAX_SPACES, MIN_INCREMENT};

/// Resolved indentation style of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Verdict {
    Space { width: usize },
    Tab { width: usize },
    Mixed { tab_width: usize, space_width: usize },
}

impl Default for Verdict {
    fn default() -> Self {
        Verdict::Space { width: 4 }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Space { width } => write!(f, "space {}", width),
            Verdict::Tab { width } => write!(f, "tab {}", width),
            Verdict::Mixed {
                tab_width,
                space_width,
            } => write!(f, "mixed tab {} space {}", tab_width, space_width),
        }
    }
}

/// Default tab width used when a file is found to be tab indented.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Resolve `counts` into a verdict.
///
/// Ties prefer space over mixed and mixed over tab. When nothing can be
/// decided, `default_result` is returned unchanged.
///
/// # Examples
///
/// ```
/// use indent_finder::accumulator::IndentFinder;
/// use indent_finder::resolve::{resolve, Verdict};
///
/// let mut finder = IndentFinder::new();
/// for line in ["if x:", "    y", "    if z:", "        w"] {
///     finder.ingest(line);
/// }
/// let verdict = resolve(finder.counts(), 8, Verdict::default());
/// assert_eq!(verdict, Verdict::Space { width: 4 });
/// ```
pub fn resolve(counts: &IndentCounts, default_tab_width: usize, default_result: Verdict) -> Verdict {
    let max_space = counts.max_space();
    let max_mixed = counts.max_mixed();
    let max_tab = counts.get(Bucket::Tab);

    let verdict = if max_space >= max_mixed && max_space > max_tab {
        preferred_width(|w| counts.get(Bucket::Space(w))).map(|width| Verdict::Space { width })
    } else if max_tab > max_mixed && max_tab > max_space {
        Some(Verdict::Tab {
            width: default_tab_width,
        })
    } else if max_mixed >= max_tab && max_mixed > max_space {
        preferred_width(|w| counts.get(Bucket::Mixed(w))).map(|space_width| Verdict::Mixed {
            tab_width: MAX_SPACES,
            space_width,
        })
    } else {
        None
    };

    verdict.unwrap_or(default_result)
}

/// Pick the widest width unless a narrower one has over 10% more lines.
///
/// Width 2 always collects part of the width 4 evidence, so the scan starts
/// from the widest bucket.
fn preferred_width(count: impl Fn(usize) -> usize) -> Option<usize> {
    let mut best = 0;
    let mut width = None;
    for w in (MIN_INCREMENT..=MAX_SPACES).rev() {
        let n = count(w);
        if n > best * 11 / 10 {
            best = n;
            width = Some(w);
        }
    }
    width
}

impl IndentFinder {
    /// Resolve the counters gathered so far.
    pub fn verdict(&self, default_tab_width: usize, default_result: Verdict) -> Verdict {
        resolve(self.counts(), default_tab_width, default_result)
    }
}
