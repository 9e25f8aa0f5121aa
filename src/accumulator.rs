//! Evidence accumulation over consecutive lines.
//!
//! Only increments in indentation between two consecutive significant lines
//! are informative. Dedents and same-level lines can close a block at any
//! prior depth, so they are ignored. Each accepted increment bumps one or
//! two [`Bucket`] counters in [`IndentCounts`].

use std::fmt;

use tracing::trace;

use crate::classify::{classify, LineClassification};

/// Smallest increment counted as an indentation step.
pub const MIN_INCREMENT: usize = 2;

/// Largest space increment, and the column width assumed for tabs in
/// mixed-mode files.
pub const MAX_SPACES: usize = 8;

const WIDTHS: usize = MAX_SPACES - MIN_INCREMENT + 1;

/// One hypothesis counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Tab,
    Space(usize),
    Mixed(usize),
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Tab => write!(f, "tab"),
            Bucket::Space(n) => write!(f, "space{}", n),
            Bucket::Mixed(n) => write!(f, "mixed{}", n),
        }
    }
}

/// Counters for every bucket: tab, space 2..=8, mixed 2..=8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentCounts {
    tab: usize,
    space: [usize; WIDTHS],
    mixed: [usize; WIDTHS],
}

impl IndentCounts {
    /// Count for `bucket`. Widths outside `MIN_INCREMENT..=MAX_SPACES` read as zero.
    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Tab => self.tab,
            Bucket::Space(w) => width_index(w).map_or(0, |i| self.space[i]),
            Bucket::Mixed(w) => width_index(w).map_or(0, |i| self.mixed[i]),
        }
    }

    /// Increment `bucket`. Out of range widths are ignored.
    pub fn bump(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Tab => self.tab += 1,
            Bucket::Space(w) => {
                if let Some(i) = width_index(w) {
                    self.space[i] += 1;
                }
            }
            Bucket::Mixed(w) => {
                if let Some(i) = width_index(w) {
                    self.mixed[i] += 1;
                }
            }
        }
    }

    /// Highest space counter.
    pub fn max_space(&self) -> usize {
        self.space.iter().copied().max().unwrap_or(0)
    }

    /// Highest mixed counter.
    pub fn max_mixed(&self) -> usize {
        self.mixed.iter().copied().max().unwrap_or(0)
    }

    /// Whether no evidence at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.tab == 0 && self.max_space() == 0 && self.max_mixed() == 0
    }
}

fn width_index(width: usize) -> Option<usize> {
    (MIN_INCREMENT..=MAX_SPACES)
        .contains(&width)
        .then(|| width - MIN_INCREMENT)
}

fn accepted(delta: usize) -> Option<usize> {
    (MIN_INCREMENT..=MAX_SPACES).contains(&delta).then_some(delta)
}

/// Stateful line-by-line indentation analyser.
///
/// Feed every line of one file through [`IndentFinder::ingest`], then
/// resolve the counters with [`crate::resolve::resolve`] or
/// [`IndentFinder::verdict`].
///
/// # Examples
///
/// ```
/// use indent_finder::accumulator::{Bucket, IndentFinder};
///
/// let mut finder = IndentFinder::new();
/// finder.ingest("fn main() {");
/// assert_eq!(finder.ingest("    body();"), Some(Bucket::Space(4)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndentFinder {
    counts: IndentCounts,
    lookback: Lookback,
    lines_processed: usize,
    indent_hints: usize,
}

/// One-line lookback: the last classification seen and whether the
/// next raw line follows a backslash continuation.
#[derive(Debug, Clone, Copy, Default)]
struct Lookback {
    previous: Option<LineClassification>,
    skip_next: bool,
}

impl IndentFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counters and lookback state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accumulated counters.
    pub fn counts(&self) -> &IndentCounts {
        &self.counts
    }

    /// Raw lines passed to [`IndentFinder::ingest`], skipped ones included.
    pub fn lines_processed(&self) -> usize {
        self.lines_processed
    }

    /// Lines that produced a hypothesis.
    pub fn indent_hints(&self) -> usize {
        self.indent_hints
    }

    /// Analyse one raw line. Returns the primary bucket it incremented.
    ///
    /// A single trailing `\n` is stripped. A line following one that ends
    /// in `\` is consumed without analysis and never becomes the comparison
    /// anchor for the next line.
    pub fn ingest(&mut self, raw_line: &str) -> Option<Bucket> {
        self.lines_processed += 1;
        let line = raw_line.strip_suffix('\n').unwrap_or(raw_line);

        let skip_current = self.lookback.skip_next;
        self.lookback.skip_next = line.ends_with('\\');
        if skip_current {
            return None;
        }

        let current = classify(line);
        let previous = std::mem::replace(&mut self.lookback.previous, current);

        let (primary, also) = transition(previous?, current?)?;
        self.counts.bump(primary);
        if let Some(bucket) = also {
            self.counts.bump(bucket);
        }
        self.indent_hints += 1;
        trace!(line = self.lines_processed, bucket = %primary, "indent hint");
        Some(primary)
    }
}

/// Derive the buckets supported by the step from `previous` to `current`.
///
/// The second bucket is set only for ambiguous short space runs, which
/// count towards both space and mixed.
fn transition(
    previous: LineClassification,
    current: LineClassification,
) -> Option<(Bucket, Option<Bucket>)> {
    use LineClassification::*;

    let single = |bucket: Bucket| Some((bucket, None));

    match (previous, current) {
        (TabOnly(_) | NoIndent, TabOnly(cur)) => {
            if cur.checked_sub(previous.prefix_len()) == Some(1) {
                single(Bucket::Tab)
            } else {
                None
            }
        }
        (SpaceOnly(_) | BeginSpace(_) | NoIndent, SpaceOnly(cur)) => {
            let delta = accepted(cur.checked_sub(previous.prefix_len())?)?;
            single(Bucket::Space(delta))
        }
        (BeginSpace(_) | NoIndent, BeginSpace(cur)) => {
            let delta = accepted(cur.checked_sub(previous.prefix_len())?)?;
            Some((Bucket::Space(delta), Some(Bucket::Mixed(delta))))
        }
        // More than one tab on the line means this is not mixed mode.
        (BeginSpace(prev), TabOnly(1)) => {
            let delta = accepted(MAX_SPACES.checked_sub(prev)?)?;
            single(Bucket::Mixed(delta))
        }
        (TabOnly(prev), Mixed { tabs, spaces }) if prev == tabs => {
            single(Bucket::Mixed(accepted(spaces)?))
        }
        (Mixed { tabs, spaces }, TabOnly(cur)) if tabs + 1 == cur => {
            let delta = accepted(MAX_SPACES.checked_sub(spaces)?)?;
            single(Bucket::Mixed(delta))
        }
        _ => None,
    }
}
