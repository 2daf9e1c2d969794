//! Encoding resolution.
//!
//! A file's bytes are decoded strictly against an ordered list of candidate
//! encodings. The first candidate that decodes the whole file without a
//! single malformed sequence wins; a failed attempt is discarded and the
//! next candidate starts again from the first byte.

use std::borrow::Cow;

use encoding_rs::{Encoding, GBK, SHIFT_JIS, UTF_8};

use crate::error::StepcountError;
use crate::Result;

/// Default candidate labels, in the order they are tried.
pub const DEFAULT_ENCODINGS: [&str; 3] = ["utf-8", "shift_jis", "gb2312"];

/// Text successfully decoded from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub text: Cow<'a, str>,
    /// Canonical name of the encoding that succeeded.
    pub encoding: &'static str,
}

impl Decoded<'_> {
    /// Physical lines of the decoded text.
    pub fn lines(&self) -> PhysicalLines<'_> {
        split_lines(&self.text)
    }
}

/// Ordered list of candidate encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingResolver {
    candidates: Vec<&'static Encoding>,
}

impl Default for EncodingResolver {
    fn default() -> Self {
        // "gb2312" is a WHATWG label for GBK.
        Self {
            candidates: vec![UTF_8, SHIFT_JIS, GBK],
        }
    }
}

impl EncodingResolver {
    /// Build a resolver from WHATWG encoding labels, keeping their order.
    ///
    /// Labels are matched case-insensitively; an unknown label is an error.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let candidates = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                Encoding::for_label(label.trim().as_bytes())
                    .ok_or_else(|| StepcountError::UnknownEncoding(label.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { candidates })
    }

    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.candidates.iter().map(|encoding| encoding.name())
    }

    /// Decode `bytes` with the first candidate that accepts all of them.
    ///
    /// Returns `None` when every candidate fails.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Decoded<'a>> {
        self.candidates.iter().find_map(|encoding| {
            encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| Decoded {
                    text,
                    encoding: encoding.name(),
                })
        })
    }
}

/// Iterator over physical lines with universal newlines.
///
/// `\r\n`, `\r` and `\n` each end a line. The terminator is not part of the
/// yielded line. A trailing line without terminator is yielded; an empty
/// input yields nothing.
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a> {
    rest: &'a str,
}

pub fn split_lines(text: &str) -> PhysicalLines<'_> {
    PhysicalLines { rest: text }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(|c| c == '\r' || c == '\n') {
            Some(end) => {
                let line = &self.rest[..end];
                let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[end + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
