//! Output formatting for parsed tables

mod html;
mod json;
mod terminal;
mod tsv;

use std::io::Write;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::model::Table;

pub use html::HtmlOutput;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;
pub use tsv::TsvOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Html => Box::new(HtmlOutput::new()),
            OutputFormat::Tsv => Box::new(TsvOutput),
        }
    }
}

/// Render a table to stdout
pub fn render_to_stdout(table: &Table, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout().lock();
    formatter.render(table, &mut stdout)
}

/// Render a table into a string
pub fn render_to_string(table: &Table, format: OutputFormat) -> Result<String> {
    let mut buf = Vec::new();
    OutputFactory::create(format).render(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_renders() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);

        for format in [
            OutputFormat::Terminal,
            OutputFormat::Json,
            OutputFormat::Html,
            OutputFormat::Tsv,
        ] {
            let out = render_to_string(&table, format).unwrap();
            assert!(out.contains('1'), "{:?} output: {}", format, out);
        }
    }
}
