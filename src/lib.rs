//! indent-finder - Detect the indentation style of source files.
//!
//! The analysis is not tied to any language. Each line's leading whitespace
//! is classified, consecutive significant lines are compared, and every
//! increment in indentation is recorded as evidence for a tab, space or
//! mixed tab/space style. The accumulated evidence is then resolved into a
//! single [`Verdict`].
//!
//! # Quick Start
//!
//! ```
//! use indent_finder::{IndentFinder, Verdict};
//!
//! let mut finder = IndentFinder::new();
//! for line in ["fn main() {", "    if x {", "        y();", "    }", "}"] {
//!     finder.ingest(line);
//! }
//!
//! assert_eq!(finder.verdict(8, Verdict::default()), Verdict::Space { width: 4 });
//! ```
//!
//! # Modules
//!
//! - [`classify`] - Per-line classification of leading whitespace
//! - [`accumulator`] - Line-by-line evidence counters
//! - [`resolve`] - Counters to verdict
//! - [`driver`] - File reading and per-language policies
//! - [`walker`] - Directory expansion with gitignore support
//! - [`output`] - Plain, vim and JSON rendering

pub mod classify;
pub mod accumulator;
pub mod resolve;
pub mod errors;
pub mod walker;
pub mod driver;
pub mod output;

// Re-export key types at crate root for convenience
pub use accumulator::{Bucket, IndentCounts, IndentFinder};
pub use classify::{classify, LineClassification};
pub use driver::{analyze_file, analyze_paths, analyze_str, AnalysisOptions, FileReport};
pub use errors::IndentError;
pub use output::{OutputError, OutputFormat};
pub use resolve::{resolve, Verdict};
pub use walker::{WalkError, WalkOptions};
