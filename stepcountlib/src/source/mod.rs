//! Source discovery: find files and decide how to scan them.
//!
//! This module handles the first stage of the pipeline:
//!
//! - **File discovery**: walk a tree in report order, with include/exclude globs
//! - **Dispatch**: map each file's extension to a scanner variant or a skip
//!
//! ## Example
//!
//! ```rust,ignore
//! use stepcountlib::source::{discover_files, Dispatcher, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/build/**")?;
//! let dispatcher = Dispatcher::default();
//! for file in discover_files(".", &filter)? {
//!     println!("{} -> {:?}", file.path.display(), dispatcher.select_file(&file));
//! }
//! ```

pub mod dispatch;
pub mod filter;

pub use dispatch::{language_for_extension, Dispatch, Dispatcher, DEFAULT_IGNORED};
pub use filter::{discover_files, FilterConfig, SourceFile};
