//! Data collection: decode files, classify lines, collect statistics.
//!
//! This module handles the second stage of the pipeline:
//!
//! - **Syntax**: immutable sign and comment tables per language variant
//! - **Automaton**: the shared line classifier driven by those tables
//! - **Encoding**: strict decoding against ordered candidate encodings
//! - **Scanning**: per-file line and step counting, plus the debug trace
//! - **Counting**: high-level API (`count_directory`, `count_file`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use stepcountlib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", &CountOptions::new())?;
//! println!("Total steps: {}", result.summary.steps);
//! ```

pub mod automaton;
pub mod counter;
pub mod encoding;
pub mod scanner;
pub mod stats;
pub mod syntax;
pub mod trace;

pub use automaton::{classify_line, ClassifiedLine, Classifier, ScanState};
pub use counter::{count_directory, count_file, CountOptions, CountResult, ScanConfig};
pub use encoding::{split_lines, Decoded, EncodingResolver, DEFAULT_ENCODINGS};
pub use scanner::{count_plain_lines, scan_bytes, scan_lines, FileScanner};
pub use stats::{FileStats, LanguageStats, ScanResult, ScanStatus, Summary};
pub use syntax::{LanguageVariant, Syntax};
pub use trace::Trace;
