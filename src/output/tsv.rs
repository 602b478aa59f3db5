//! Tab-separated output, the same text the clipboard receives

use std::io::Write;

use anyhow::Result;

use crate::export::to_clipboard_text;
use crate::model::Table;

use super::OutputFormatter;

/// Tab-separated output
pub struct TsvOutput;

impl OutputFormatter for TsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if table.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", to_clipboard_text(table))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_ends_with_newline() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", "x\ty"]]);
        let mut out = Vec::new();

        TsvOutput.render(&table, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "a\tb\n1\t\"x\ty\"\n");
    }
}
