//! File filtering and discovery with glob pattern support.
//!
//! Discovery walks a directory depth-first. Inside each directory the
//! files come first, sorted by name ignoring case, then the
//! subdirectories in the same order. Include/exclude globs drop files from
//! the sequence but never reorder it.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::error::StepcountError;
use crate::Result;

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every file)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it matches at least one include pattern (or include
    /// is empty) and no exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| StepcountError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// A discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Directory containing the file, relative to the discovery root.
    pub relative_dir: PathBuf,
    pub file_name: String,
    /// Extension with its leading dot (`".py"`), or empty.
    pub extension: String,
}

impl SourceFile {
    /// Describe `path`, found while discovering from `root`.
    pub fn new(path: PathBuf, root: &Path) -> Self {
        let relative_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self {
            path,
            relative_dir,
            file_name,
            extension,
        }
    }
}

/// Files before directories, then by name ignoring case.
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir.cmp(&b_dir).then_with(|| {
        let a_name = a.file_name().to_string_lossy();
        let b_name = b.file_name().to_string_lossy();
        a_name
            .to_lowercase()
            .cmp(&b_name.to_lowercase())
            .then_with(|| a_name.cmp(&b_name))
    })
}

/// Discover files under `root` in walk order.
///
/// A file path yields just that file (if it passes the filter).
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<SourceFile>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(StepcountError::PathNotFound(root.to_path_buf()));
    }

    if root.is_file() {
        let parent = root.parent().unwrap_or(root);
        return Ok(filter
            .matches(root)
            .then(|| SourceFile::new(root.to_path_buf(), parent))
            .into_iter()
            .collect());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by(walk_order) {
        let entry = entry.map_err(|e| StepcountError::FileRead {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;

        if entry.file_type().is_file() && filter.matches(entry.path()) {
            files.push(SourceFile::new(entry.into_path(), root));
        }
    }

    Ok(files)
}
