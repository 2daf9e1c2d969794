//! File scanners.
//!
//! [`FileScanner`] drives a [`Classifier`] over a file's lines in physical
//! order and folds the results into a [`ScanResult`]. Plain text is only
//! counted. [`scan_bytes`] adds the decoding step in front of either.

use super::automaton::Classifier;
use super::encoding::EncodingResolver;
use super::stats::ScanResult;
use super::syntax::{LanguageVariant, Syntax};
use super::trace::Trace;

/// Line and step counter for one classified file.
#[derive(Debug)]
pub struct FileScanner {
    classifier: Classifier,
}

impl FileScanner {
    pub fn new(syntax: &'static Syntax) -> Self {
        Self {
            classifier: Classifier::new(syntax),
        }
    }

    /// Classify every line in order.
    ///
    /// When `trace` is given, one record per line is appended to it.
    pub fn scan<'a, I>(mut self, lines: I, mut trace: Option<&mut Trace>) -> ScanResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut line_count = 0;
        let mut steps = 0;

        for line in lines {
            line_count += 1;
            let classified = self.classifier.classify(line);
            if classified.is_operative() {
                steps += 1;
            }
            if let Some(trace) = trace.as_deref_mut() {
                trace.record(line_count, &classified);
            }
        }

        ScanResult::counted(line_count, Some(steps))
    }
}

/// Count lines without classifying them.
pub fn count_plain_lines<'a, I>(lines: I) -> ScanResult
where
    I: IntoIterator<Item = &'a str>,
{
    ScanResult::counted(lines.into_iter().count() as u64, None)
}

/// Scan already decoded lines with the scanner for `variant`.
pub fn scan_lines<'a, I>(lines: I, variant: LanguageVariant, trace: Option<&mut Trace>) -> ScanResult
where
    I: IntoIterator<Item = &'a str>,
{
    match variant.syntax() {
        Some(syntax) => FileScanner::new(syntax).scan(lines, trace),
        None => count_plain_lines(lines),
    }
}

/// Decode `bytes` and scan them.
///
/// Returns the result and the name of the encoding that decoded the file,
/// or a [`ScanResult::decode_error`] and `None` when every candidate fails.
pub fn scan_bytes(
    bytes: &[u8],
    variant: LanguageVariant,
    resolver: &EncodingResolver,
    trace: Option<&mut Trace>,
) -> (ScanResult, Option<&'static str>) {
    match resolver.decode(bytes) {
        Some(decoded) => (
            scan_lines(decoded.lines(), variant, trace),
            Some(decoded.encoding),
        ),
        None => (ScanResult::decode_error(variant), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::ScanStatus;

    fn scan(variant: LanguageVariant, text: &str) -> ScanResult {
        scan_lines(text.lines(), variant, None)
    }

    #[test]
    fn python_scenario() {
        let result = scan(LanguageVariant::PythonLike, "x = 1\n# comment\n\n\"hello\"\n");
        assert_eq!(result, ScanResult::counted(4, Some(2)));
    }

    #[test]
    fn c_family_scenario() {
        let result = scan(LanguageVariant::CFamily, "/*\n comment\n*/\nint a=1;\n");
        assert_eq!(result, ScanResult::counted(4, Some(1)));
    }

    #[test]
    fn sql_scenario() {
        let result = scan(LanguageVariant::SqlLike, "-- note\nSELECT 1;\n");
        assert_eq!(result, ScanResult::counted(2, Some(1)));
    }

    #[test]
    fn plain_text_has_no_steps() {
        let result = scan(LanguageVariant::PlainText, "a\nb\n\nc\n# d\ne\nf\n");
        assert_eq!(result.lines, Some(7));
        assert_eq!(result.steps, None);
        assert_eq!(result.status, ScanStatus::Normal);
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            scan(LanguageVariant::CFamily, ""),
            ScanResult::counted(0, Some(0))
        );
    }

    #[test]
    fn bytes_with_fallback_encoding() {
        let (result, encoding) = scan_bytes(
            b"s = '\x82\xa0'\r\n# c\r\n",
            LanguageVariant::PythonLike,
            &EncodingResolver::default(),
            None,
        );
        assert_eq!(result, ScanResult::counted(2, Some(1)));
        assert_eq!(encoding, Some("Shift_JIS"));
    }

    #[test]
    fn bytes_nobody_decodes() {
        let (result, encoding) = scan_bytes(
            b"int x;\xff\n",
            LanguageVariant::CFamily,
            &EncodingResolver::default(),
            None,
        );
        assert_eq!(result.lines, Some(0));
        assert_eq!(result.steps, Some(0));
        assert_eq!(result.status, ScanStatus::Error);
        assert_eq!(encoding, None);
    }

    #[test]
    fn trace_records_every_line() {
        let mut trace = Trace::new();
        scan_lines(
            ["x = 1", "# c"],
            LanguageVariant::PythonLike,
            Some(&mut trace),
        );
        assert_eq!(trace.as_str(), "|     1: [x] [=] [1]\n      2: \n");
    }

    #[test]
    fn plain_text_is_not_traced() {
        let mut trace = Trace::new();
        scan_lines(["a", "b"], LanguageVariant::PlainText, Some(&mut trace));
        assert!(trace.is_empty());
    }
}
