//! Per-line debug trace.
//!
//! For each classified file the trace holds the file path followed by one
//! record per physical line:
//!
//! ```text
//! src/app.py
//! |     1: [x] [=] [1]
//!       2:
//! ```
//!
//! The first column is `|` for an operative line and a space otherwise.

use std::fmt::Write;
use std::path::Path;

use super::automaton::ClassifiedLine;

/// Accumulates trace records as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    text: String,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&mut self, path: &Path) {
        let _ = writeln!(self.text, "{}", path.display());
    }

    /// Append the record for 1-based line `number`.
    pub fn record(&mut self, number: u64, line: &ClassifiedLine) {
        let marker = if line.is_operative() { '|' } else { ' ' };
        // Writing to a String cannot fail.
        let _ = write!(self.text, "{marker} {number:>5}: ");
        for (i, token) in line.tokens.iter().enumerate() {
            if i > 0 {
                self.text.push(' ');
            }
            let _ = write!(self.text, "[{token}]");
        }
        self.text.push('\n');
    }

    pub fn append(&mut self, other: Trace) {
        self.text.push_str(&other.text);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
