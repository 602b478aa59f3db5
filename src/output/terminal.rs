//! Boxed grid output for the terminal

use std::borrow::Cow;
use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::model::Table;

use super::OutputFormatter;

/// Terminal grid output
pub struct TerminalOutput {
    show_count: bool,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { show_count: true }
    }

    /// Grid only, without the trailing row count
    pub fn grid_only() -> Self {
        Self { show_count: false }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if table.is_empty() {
            writeln!(writer, "{}", NO_DATA)?;
            return Ok(());
        }

        let data: Vec<Vec<Cow<'_, str>>> = table
            .iter()
            .map(|row| row.iter().map(|c| display_cell(c)).collect())
            .collect();
        write!(writer, "{}", build_table(&data, table.max_width()))?;

        if self.show_count {
            match table.data_rows().len() {
                0 => writeln!(writer, "{}", NO_DATA)?,
                n => writeln!(writer, "{} rows found", n)?,
            }
        }
        Ok(())
    }
}

const NO_DATA: &str = "No data rows detected.";

/// Terminal columns taken by a string; wide CJK and emoji count as two
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Keep multi-line cells on one grid line
fn display_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(['\n', '\r', '\t']) {
        Cow::Owned(cell.replace("\r\n", " ").replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Build a boxed grid; the first row is set off as a header and short rows are padded for display
fn build_table(data: &[Vec<Cow<'_, str>>], col_count: usize) -> String {
    if data.is_empty() || col_count == 0 {
        return String::new();
    }

    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(display_width(cell));
        }
    }

    let mut output = String::new();

    push_border(&mut output, &col_widths, '┌', '┬', '┐');
    if let Some(header) = data.first() {
        push_row(&mut output, header, &col_widths);
    }
    if data.len() > 1 {
        push_border(&mut output, &col_widths, '├', '┼', '┤');
        for row in data.iter().skip(1) {
            push_row(&mut output, row, &col_widths);
        }
    }
    push_border(&mut output, &col_widths, '└', '┴', '┘');

    output
}

fn push_border(output: &mut String, col_widths: &[usize], left: char, mid: char, right: char) {
    output.push(left);
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push(mid);
        }
    }
    output.push(right);
    output.push('\n');
}

fn push_row(output: &mut String, row: &[Cow<'_, str>], col_widths: &[usize]) {
    output.push('│');
    for (i, width) in col_widths.iter().enumerate() {
        let cell = row.get(i).map(|c| c.as_ref()).unwrap_or("");
        let pad = width - display_width(cell);
        output.push(' ');
        output.push_str(cell);
        output.push_str(&" ".repeat(pad + 1));
        output.push('│');
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &Table, formatter: &TerminalOutput) -> String {
        let mut out = Vec::new();
        formatter.render(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_grid_with_header() {
        let table = Table::from_rows(vec![vec!["id", "name"], vec!["1", "bolt"]]);

        let expected = "\
┌────┬──────┐
│ id │ name │
├────┼──────┤
│ 1  │ bolt │
└────┴──────┘
1 rows found
";
        assert_eq!(render(&table, &TerminalOutput::new()), expected);
    }

    #[test]
    fn test_ragged_rows_are_padded_for_display() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1"]]);

        let expected = "\
┌───┬───┐
│ a │ b │
├───┼───┤
│ 1 │   │
└───┴───┘
";
        assert_eq!(render(&table, &TerminalOutput::grid_only()), expected);
    }

    #[test]
    fn test_header_only() {
        let table = Table::from_rows(vec![vec!["only"]]);

        let out = render(&table, &TerminalOutput::new());
        assert!(out.starts_with("┌──────┐\n│ only │\n└──────┘\n"));
        assert!(out.ends_with("└──────┘\nNo data rows detected.\n"));
        assert!(!out.contains("rows found"));
    }

    #[test]
    fn test_wide_characters_keep_borders_aligned() {
        let table = Table::from_rows(vec![vec!["名前", "x"], vec!["ab", "y"]]);

        let expected = "\
┌──────┬───┐
│ 名前 │ x │
├──────┼───┤
│ ab   │ y │
└──────┴───┘
";
        let out = render(&table, &TerminalOutput::grid_only());
        assert_eq!(out, expected);

        let widths: Vec<usize> = out.lines().map(display_width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("bolt"), 4);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_multiline_cell_stays_on_one_line() {
        assert_eq!(display_cell("a\r\nb\nc"), "a b c");
        assert_eq!(display_cell("plain"), "plain");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render(&Table::new(), &TerminalOutput::new()), "No data rows detected.\n");
    }
}
