//! HTML table preview

use std::io::Write;

use anyhow::Result;

use crate::model::{Row, Table};

use super::OutputFormatter;

/// Standalone HTML page showing the table
pub struct HtmlOutput;

impl HtmlOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for HtmlOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "  <meta charset=\"UTF-8\">")?;
        writeln!(writer, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
        writeln!(writer, "  <title>{}</title>", TITLE)?;
        writeln!(writer, "  <style>")?;
        writeln!(writer, "{}", CSS_STYLES)?;
        writeln!(writer, "  </style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;

        writeln!(writer, "  <div class=\"header\">")?;
        writeln!(writer, "    <h1>{}</h1>", TITLE)?;
        writeln!(writer, "    <p class=\"count\">{} rows found</p>", table.data_rows().len())?;
        writeln!(writer, "  </div>")?;

        match table.header() {
            Some(header) => {
                writeln!(writer, "  <table>")?;
                writeln!(writer, "    <thead>")?;
                write_row(writer, header, "th")?;
                writeln!(writer, "    </thead>")?;
                writeln!(writer, "    <tbody>")?;
                for row in table.data_rows() {
                    write_row(writer, row, "td")?;
                }
                writeln!(writer, "    </tbody>")?;
                writeln!(writer, "  </table>")?;
                if table.data_rows().is_empty() {
                    writeln!(writer, "  <p class=\"empty\">No data rows detected.</p>")?;
                }
            }
            None => writeln!(writer, "  <p class=\"empty\">No data rows detected.</p>")?,
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;

        Ok(())
    }
}

fn write_row(writer: &mut dyn Write, row: &Row, tag: &str) -> Result<()> {
    writeln!(writer, "      <tr>")?;
    for cell in row {
        writeln!(writer, "        <{tag}>{}</{tag}>", html_escape(cell), tag = tag)?;
    }
    writeln!(writer, "      </tr>")?;
    Ok(())
}

fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const TITLE: &str = "Extracted Data";

const CSS_STYLES: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }

    body {
      font-family: system-ui, sans-serif;
      background: #f8fafc;
      color: #475569;
      padding: 2rem;
    }

    .header { margin-bottom: 1.5rem; }
    .header h1 { color: #0f172a; font-size: 1.25rem; font-weight: 600; }
    .header .count { font-size: 0.875rem; color: #64748b; }

    table {
      border-collapse: collapse;
      background: #fff;
      font-size: 0.875rem;
    }

    th, td {
      text-align: left;
      padding: 0.75rem 1.5rem;
      white-space: pre;
      border-bottom: 1px solid #f1f5f9;
    }

    th {
      background: #f8fafc;
      color: #334155;
      font-size: 0.75rem;
      text-transform: uppercase;
      position: sticky;
      top: 0;
    }

    tbody tr:hover { background: #f8fafc; }

    .empty { padding: 3rem; text-align: center; color: #94a3b8; }
"#;
