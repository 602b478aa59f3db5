//! Parser layer turning raw delimited text into a table

mod csv;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ParseOptions;
use crate::model::Table;

use self::csv::Tokenizer;

/// Parse raw CSV text with default options (comma delimiter, trimmed cells).
///
/// Never fails. Quoting mistakes are absorbed, blank lines are skipped and an
/// empty input gives an empty table.
pub fn parse(text: &str) -> Table {
    parse_with(text, &ParseOptions::default())
}

/// Parse raw CSV text with explicit options
pub fn parse_with(text: &str, options: &ParseOptions) -> Table {
    Tokenizer::new(options).tokenize(text)
}

/// Read the raw extraction output from a file, or stdin when `path` is `None` or `-`
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input: {}", p.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}

/// True when the text is the placeholder payload served without a real extraction
pub fn is_demo_payload(raw: &str) -> bool {
    raw.contains("DEMO-DATA") || raw.contains("DEMO_FALLBACK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let text = read_source(Some(&path)).unwrap();
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Some(Path::new("/nonexistent/raw.csv"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read input"));
    }

    #[test]
    fn test_demo_payload_detection() {
        assert!(is_demo_payload("id,name\nDEMO-DATA-001,Sample"));
        assert!(is_demo_payload("DEMO_FALLBACK"));
        assert!(!is_demo_payload("id,name\n1,Real"));
    }
}
