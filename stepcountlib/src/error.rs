//! Error types for stepcountlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting lines and steps.
///
/// A file that no candidate encoding can decode is not an error here: it is
/// reported as [`ScanStatus::Error`](crate::ScanStatus::Error) on that file
/// and counting carries on.
#[derive(Error, Debug)]
pub enum StepcountError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Encoding label not known to the WHATWG registry
    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// The worker pool for parallel scanning could not be started
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
