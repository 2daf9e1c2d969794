//! Extension dispatch.
//!
//! Maps a file extension (with its leading dot, case as found on disk) to
//! the scanner variant that handles it, or to [`Dispatch::Skip`].

use serde::{Deserialize, Serialize};

use crate::data::syntax::LanguageVariant;

use super::filter::SourceFile;

/// Extensions skipped unless configured otherwise.
pub const DEFAULT_IGNORED: [&str; 2] = [".dat", ".ini"];

/// Outcome of dispatching one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dispatch {
    Scan(LanguageVariant),
    /// Excluded by policy; no scan is performed.
    Skip,
}

impl Dispatch {
    pub fn language(self) -> Option<LanguageVariant> {
        match self {
            Dispatch::Scan(variant) => Some(variant),
            Dispatch::Skip => None,
        }
    }
}

/// The variant owning a recognized extension, if any.
pub fn language_for_extension(extension: &str) -> Option<LanguageVariant> {
    match extension {
        ".py" => Some(LanguageVariant::PythonLike),
        ".java" | ".c" | ".cpp" => Some(LanguageVariant::CFamily),
        ".sql" => Some(LanguageVariant::SqlLike),
        ".txt" => Some(LanguageVariant::PlainText),
        _ => None,
    }
}

/// Extension dispatcher with an ignore-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    ignored: Vec<String>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED)
    }
}

impl Dispatcher {
    pub fn new<I, S>(ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored: ignored.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// Dispatch by extension alone.
    pub fn select(&self, extension: &str) -> Dispatch {
        if self.ignored.iter().any(|ignored| ignored == extension) {
            return Dispatch::Skip;
        }
        Dispatch::Scan(language_for_extension(extension).unwrap_or(LanguageVariant::PlainText))
    }

    /// Dispatch a discovered file.
    ///
    /// A dotfile without extension (`.gitignore`) is skipped.
    pub fn select_file(&self, file: &SourceFile) -> Dispatch {
        if file.extension.is_empty() && file.file_name.starts_with('.') {
            return Dispatch::Skip;
        }
        self.select(&file.extension)
    }
}
