//! Table-ready data structures for count output.
//!
//! `ReportTable` is a pure presentation layer: every cell is already a
//! string, absent counts are rendered as `-`. Renderers only align and
//! style.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::counter::CountResult;
use crate::data::stats::{FileStats, LanguageStats, ScanStatus, Summary};

/// Placeholder for an absent count.
pub const ABSENT: &str = "-";

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (row number, language name, "Total (N files)")
    pub label: String,
    /// Remaining cells, one per non-label header
    pub values: Vec<String>,
}

/// Table-ready count data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    /// Column headers, label column first
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub footer: TableRow,
}

impl ReportTable {
    /// One row per file, in walk order.
    pub fn from_count_result(result: &CountResult) -> Self {
        let headers = ["No", "Path", "File", "Ext", "Lines", "Steps", "Status"]
            .map(String::from)
            .to_vec();

        let rows = result
            .files
            .iter()
            .enumerate()
            .map(|(index, file)| TableRow {
                label: (index + 1).to_string(),
                values: file_cells(file),
            })
            .collect();

        let footer = TableRow {
            label: footer_label(&result.summary),
            values: vec![
                String::new(),
                String::new(),
                String::new(),
                result.summary.lines.to_string(),
                result.summary.steps.to_string(),
                String::new(),
            ],
        };

        ReportTable {
            headers,
            rows,
            footer,
        }
    }

    /// One row per scanner variant, skipped files last.
    pub fn by_language(result: &CountResult) -> Self {
        let headers = ["Language", "Files", "Lines", "Steps", "Skipped", "Errors"]
            .map(String::from)
            .to_vec();

        let rows = result
            .by_language()
            .iter()
            .map(|group: &LanguageStats| TableRow {
                label: group
                    .language
                    .map_or_else(|| "Skipped".to_string(), |l| l.name().to_string()),
                values: summary_cells(&group.summary),
            })
            .collect();

        let footer = TableRow {
            label: footer_label(&result.summary),
            values: summary_cells(&result.summary),
        };

        ReportTable {
            headers,
            rows,
            footer,
        }
    }
}

fn footer_label(summary: &Summary) -> String {
    format!("Total ({} files)", summary.files)
}

fn display_dir(dir: &Path) -> String {
    if dir.as_os_str().is_empty() {
        ".".to_string()
    } else {
        dir.display().to_string()
    }
}

fn count_cell(count: Option<u64>) -> String {
    count.map_or_else(|| ABSENT.to_string(), |n| n.to_string())
}

fn status_cell(file: &FileStats) -> String {
    if file.is_skipped() {
        return "skipped".to_string();
    }
    match file.result.status {
        ScanStatus::Normal => "normal".to_string(),
        ScanStatus::Error => "error".to_string(),
    }
}

fn file_cells(file: &FileStats) -> Vec<String> {
    vec![
        display_dir(&file.relative_dir),
        file.file_name.clone(),
        file.extension.clone(),
        count_cell(file.result.lines),
        count_cell(file.result.steps),
        status_cell(file),
    ]
}

fn summary_cells(summary: &Summary) -> Vec<String> {
    vec![
        summary.files.to_string(),
        summary.lines.to_string(),
        summary.steps.to_string(),
        summary.skipped.to_string(),
        summary.errors.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::ScanResult;
    use crate::data::syntax::LanguageVariant;
    use std::path::PathBuf;

    fn file(
        dir: &str,
        name: &str,
        ext: &str,
        language: Option<LanguageVariant>,
        result: ScanResult,
    ) -> FileStats {
        FileStats {
            path: PathBuf::from(dir).join(name),
            relative_dir: PathBuf::from(dir),
            file_name: name.to_string(),
            extension: ext.to_string(),
            language,
            result,
            encoding: None,
        }
    }

    fn sample_count_result() -> CountResult {
        let files = vec![
            file(
                "",
                "app.py",
                ".py",
                Some(LanguageVariant::PythonLike),
                ScanResult::counted(4, Some(2)),
            ),
            file("", "setup.ini", ".ini", None, ScanResult::skipped()),
            file(
                "docs",
                "notes.md",
                ".md",
                Some(LanguageVariant::PlainText),
                ScanResult::counted(7, None),
            ),
            file(
                "src",
                "bad.c",
                ".c",
                Some(LanguageVariant::CFamily),
                ScanResult::decode_error(LanguageVariant::CFamily),
            ),
        ];
        let summary = files.iter().collect();

        CountResult {
            files,
            summary,
            decode_errors: vec![PathBuf::from("src/bad.c")],
            trace: None,
        }
    }

    #[test]
    fn test_file_table_headers() {
        let table = ReportTable::from_count_result(&sample_count_result());

        assert_eq!(
            table.headers,
            vec!["No", "Path", "File", "Ext", "Lines", "Steps", "Status"]
        );
    }

    #[test]
    fn test_file_rows() {
        let table = ReportTable::from_count_result(&sample_count_result());

        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].label, "1");
        assert_eq!(
            table.rows[0].values,
            vec![".", "app.py", ".py", "4", "2", "normal"]
        );
        assert_eq!(
            table.rows[1].values,
            vec![".", "setup.ini", ".ini", "-", "-", "skipped"]
        );
        assert_eq!(
            table.rows[2].values,
            vec!["docs", "notes.md", ".md", "7", "-", "normal"]
        );
        assert_eq!(table.rows[3].label, "4");
        assert_eq!(
            table.rows[3].values,
            vec!["src", "bad.c", ".c", "0", "0", "error"]
        );
    }

    #[test]
    fn test_file_footer() {
        let table = ReportTable::from_count_result(&sample_count_result());

        assert_eq!(table.footer.label, "Total (4 files)");
        assert_eq!(table.footer.values[3], "11");
        assert_eq!(table.footer.values[4], "2");
        assert_eq!(table.footer.values.len(), table.headers.len() - 1);
    }

    #[test]
    fn test_language_table() {
        let table = ReportTable::by_language(&sample_count_result());

        let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Python", "C/Java", "Text", "Skipped"]);
        assert_eq!(table.rows[1].values, vec!["1", "0", "0", "0", "1"]);
        assert_eq!(table.rows[3].values, vec!["1", "0", "0", "1", "0"]);
        assert_eq!(table.footer.values, vec!["4", "11", "2", "1", "1"]);
    }
}
