//! # stepcountlib
//!
//! A line and step counter for source trees that understands comments and
//! string literals.
//!
//! ## Overview
//!
//! For every file the library reports two numbers: the physical line count
//! and the *step* count, the number of lines holding at least one real
//! token (identifier, number, operator or string literal) rather than only
//! whitespace or comment text.
//!
//! - **Python** (`.py`): `#` comments, `"""` blocks
//! - **C family** (`.java`, `.c`, `.cpp`): `//` and `/* */` comments
//! - **SQL** (`.sql`): `--` and `/* */` comments, doubled-quote escapes
//! - **Plain text** (`.txt` and anything unrecognized): lines only
//! - **Skipped** (`.dat`, `.ini`, dotfiles without extension): no counts
//!
//! ## Pipeline
//!
//! 1. [`source`]: walk the tree in report order and dispatch by extension
//! 2. [`data`]: decode each file, classify its lines, collect statistics
//! 3. [`output`]: turn results into display-ready tables
//!
//! Files whose bytes no candidate encoding can decode are not errors: they
//! are reported with [`ScanStatus::Error`] and counting carries on.
//!
//! ## Example
//!
//! ```rust
//! use stepcountlib::{count_directory, count_file, CountOptions, FilterConfig, ScanConfig};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let file_path = dir.path().join("Main.java");
//! fs::write(&file_path, "/*\n * Entry point.\n */\nclass Main {}\n").unwrap();
//!
//! // Count a single file
//! let stats = count_file(&file_path, &ScanConfig::default()).unwrap();
//! assert_eq!(stats.result.lines, Some(4));
//! assert_eq!(stats.result.steps, Some(1));
//!
//! // Count a directory
//! let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
//! assert_eq!(result.summary.steps, 1);
//!
//! // Count with filtering
//! let filter = FilterConfig::new().exclude("**/generated/**").unwrap();
//! let result = count_directory(dir.path(), &CountOptions::new().filter(filter)).unwrap();
//! assert_eq!(result.files.len(), 1);
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use data::{
    classify_line, count_directory, count_file, ClassifiedLine, Classifier, CountOptions,
    CountResult, EncodingResolver, FileStats, LanguageStats, LanguageVariant, ScanConfig,
    ScanResult, ScanState, ScanStatus, Summary, Trace,
};
pub use error::StepcountError;
pub use output::{ReportTable, TableRow};
pub use source::{discover_files, Dispatch, Dispatcher, FilterConfig, SourceFile};

/// Result type for stepcountlib operations
pub type Result<T> = std::result::Result<T, StepcountError>;
