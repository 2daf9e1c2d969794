//! Core data structures for line and step statistics.
//!
//! Every file ends up with a [`ScanResult`]: a physical line count, a step
//! count and a status. Either count may be absent:
//!
//! - **Skipped** files (ignored extensions, dotfiles without extension) have
//!   neither count.
//! - **Plain text** files have a line count but no step count.
//! - **Classified** files (Python, C family, SQL) have both.
//!
//! A file no candidate encoding can decode keeps the shape of its variant
//! with zero counts and [`ScanStatus::Error`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use super::syntax::LanguageVariant;

/// Terminal status of one file scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    #[default]
    Normal,
    /// No candidate encoding decoded the file.
    Error,
}

/// Counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Physical lines, blank ones included.
    pub lines: Option<u64>,
    /// Operative lines.
    pub steps: Option<u64>,
    pub status: ScanStatus,
}

impl ScanResult {
    /// Result for a file that was scanned without error.
    pub fn counted(lines: u64, steps: Option<u64>) -> Self {
        Self {
            lines: Some(lines),
            steps,
            status: ScanStatus::Normal,
        }
    }

    /// Result for a file excluded by policy.
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Result for a file of `variant` that could not be decoded.
    pub fn decode_error(variant: LanguageVariant) -> Self {
        Self {
            lines: Some(0),
            steps: variant.counts_steps().then_some(0),
            status: ScanStatus::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ScanStatus::Error
    }
}

/// Statistics for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file.
    pub path: PathBuf,
    /// Directory containing the file, relative to the scan root.
    pub relative_dir: PathBuf,
    pub file_name: String,
    /// Extension with its leading dot, or empty.
    pub extension: String,
    /// Scanner variant, `None` when the file was skipped.
    pub language: Option<LanguageVariant>,
    pub result: ScanResult,
    /// Canonical name of the encoding that decoded the file.
    pub encoding: Option<String>,
}

impl FileStats {
    pub fn is_skipped(&self) -> bool {
        self.language.is_none()
    }
}

/// Totals over a set of files.
///
/// Absent counts add nothing; skipped files are counted in `skipped` and
/// decode failures in `errors`, but both still count toward `files`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files: u64,
    pub lines: u64,
    pub steps: u64,
    pub skipped: u64,
    pub errors: u64,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file into the totals.
    pub fn add_file(&mut self, file: &FileStats) {
        self.files += 1;
        self.lines += file.result.lines.unwrap_or(0);
        self.steps += file.result.steps.unwrap_or(0);
        if file.is_skipped() {
            self.skipped += 1;
        }
        if file.result.is_error() {
            self.errors += 1;
        }
    }
}

impl<'a> FromIterator<&'a FileStats> for Summary {
    fn from_iter<I: IntoIterator<Item = &'a FileStats>>(iter: I) -> Self {
        let mut summary = Summary::new();
        for file in iter {
            summary.add_file(file);
        }
        summary
    }
}

impl Add for Summary {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            lines: self.lines + other.lines,
            steps: self.steps + other.steps,
            skipped: self.skipped + other.skipped,
            errors: self.errors + other.errors,
        }
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.lines += other.lines;
        self.steps += other.steps;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

/// Totals for one scanner variant (`None` groups skipped files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub language: Option<LanguageVariant>,
    pub summary: Summary,
}
