//! Text rendering for CLI output

use console::{measure_text_width, pad_str, Alignment, Style};
use stepcountlib::ReportTable;

/// Columns whose cells are right-aligned.
const NUMERIC_HEADERS: [&str; 6] = ["No", "Lines", "Steps", "Files", "Skipped", "Errors"];

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > max_len && max_len > 2 {
        let tail: String = chars[chars.len() - (max_len - 2)..].iter().collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

fn alignment(header: &str) -> Alignment {
    if NUMERIC_HEADERS.contains(&header) {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Render a report table as aligned text.
///
/// Headers are bold when the terminal supports styling. Cells wider than
/// `max_cell_width` are truncated from the left. The footer shares the
/// row layout, its label sitting in the first column.
pub fn render_table(table: &ReportTable, max_cell_width: usize) -> String {
    let header_style = Style::new().bold();

    let cells = |label: &str, values: &[String]| -> Vec<String> {
        std::iter::once(label)
            .chain(values.iter().map(String::as_str))
            .map(|cell| truncate_name(cell, max_cell_width))
            .collect()
    };

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| cells(&row.label, &row.values))
        .collect();
    let footer = cells(&table.footer.label, &table.footer.values);

    let mut widths: Vec<usize> = table.headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows.iter().chain(std::iter::once(&footer)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let format_line = |cells: &[String], style: Option<&Style>| -> String {
        cells
            .iter()
            .zip(&widths)
            .zip(&table.headers)
            .map(|((cell, width), header)| {
                let padded = pad_str(cell, *width, alignment(header), None);
                match style {
                    Some(style) => style.apply_to(padded).to_string(),
                    None => padded.into_owned(),
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let separator = "-".repeat(total_width);

    let mut output = String::new();
    output.push_str(&format_line(&table.headers, Some(&header_style)));
    output.push('\n');
    output.push_str(&separator);
    output.push('\n');
    for row in &rows {
        output.push_str(&format_line(row, None));
        output.push('\n');
    }
    output.push_str(&separator);
    output.push('\n');
    output.push_str(&format_line(&footer, None));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepcountlib::TableRow;

    fn sample_table() -> ReportTable {
        ReportTable {
            headers: ["No", "Path", "File", "Ext", "Lines", "Steps", "Status"]
                .map(String::from)
                .to_vec(),
            rows: vec![
                TableRow {
                    label: "1".into(),
                    values: ["src", "main.c", ".c", "120", "80", "normal"]
                        .map(String::from)
                        .to_vec(),
                },
                TableRow {
                    label: "2".into(),
                    values: [".", "setup.ini", ".ini", "-", "-", "skipped"]
                        .map(String::from)
                        .to_vec(),
                },
            ],
            footer: TableRow {
                label: "Total (2 files)".into(),
                values: ["", "", "", "120", "80", ""].map(String::from).to_vec(),
            },
        }
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("a/very/long/path", 8), "..g/path");
        assert_eq!(truncate_name("日本語のファイル", 5), "..ァイル");
    }

    #[test]
    fn test_render_rows_are_aligned() {
        let output = render_table(&sample_table(), 60);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].contains("No"));
        assert!(lines[0].contains("Status"));
        assert!(lines[1].chars().all(|c| c == '-'));

        let main = lines[2];
        let ini = lines[3];
        assert!(main.contains("main.c"));
        assert!(ini.contains("setup.ini"));
        assert_eq!(main.find("main.c"), ini.find("setup.ini"));
        // Right-aligned counts end in the same column.
        assert_eq!(main.find("120").unwrap() + 3, ini.find('-').unwrap() + 1);
    }

    #[test]
    fn test_render_footer() {
        let output = render_table(&sample_table(), 60);
        let footer = output.lines().last().unwrap();

        assert!(footer.starts_with("Total (2 files)"));
        assert!(footer.contains("120"));
        assert!(footer.trim_end().ends_with("80"));
    }
}
