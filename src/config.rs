//! Configuration handling for docugrid

use std::path::PathBuf;

/// Output format for rendering a parsed table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Html,
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Tokenizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Field delimiter outside quoted spans
    pub delimiter: char,
    /// Strip surrounding whitespace from every cell
    pub trim: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: true,
        }
    }
}

impl ParseOptions {
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Configuration for a single extraction run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Raw CSV input path; `None` reads stdin
    pub input: Option<PathBuf>,
    /// Name of the original document, used for the download file name
    pub source_name: Option<String>,
    /// Tokenizer settings
    pub parse: ParseOptions,
    /// Output format
    pub output_format: OutputFormat,
    /// Copy the tab-separated table to the clipboard
    pub copy_table: bool,
    /// Copy the raw text to the clipboard
    pub copy_raw: bool,
    /// Open a new spreadsheet in the browser after copying the table
    pub open_sheets: bool,
    /// Directory to save the raw CSV download into
    pub download_dir: Option<PathBuf>,
    /// Only show statistics, not the table
    pub stats_only: bool,
    /// Skip rendering entirely
    pub quiet: bool,
}

impl Config {
    /// Create a new Config reading from the given path
    pub fn new(input: PathBuf) -> Self {
        Self {
            input: Some(input),
            ..Default::default()
        }
    }

    /// Set tokenizer settings
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the original document name
    pub fn with_source_name(mut self, name: String) -> Self {
        self.source_name = Some(name);
        self
    }

    /// Enable copying the table to the clipboard
    pub fn with_copy_table(mut self, copy: bool) -> Self {
        self.copy_table = copy;
        self
    }

    /// Enable copying the raw text to the clipboard
    pub fn with_copy_raw(mut self, copy: bool) -> Self {
        self.copy_raw = copy;
        self
    }

    /// Open a new spreadsheet after copying
    pub fn with_open_sheets(mut self, open: bool) -> Self {
        self.open_sheets = open;
        self
    }

    /// Save the raw text into a directory
    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = Some(dir);
        self
    }

    /// Enable stats-only mode
    pub fn with_stats_only(mut self, stats_only: bool) -> Self {
        self.stats_only = stats_only;
        self
    }

    /// Suppress table rendering
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Document name used to derive the download file name.
    ///
    /// Falls back to the input file name, then to `document.pdf`.
    pub fn effective_source_name(&self) -> String {
        if let Some(name) = &self.source_name {
            return name.clone();
        }
        self.input
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| crate::export::DEFAULT_SOURCE_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("tsv".parse::<OutputFormat>(), Ok(OutputFormat::Tsv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_effective_source_name() {
        assert_eq!(Config::default().effective_source_name(), "document.pdf");

        let config = Config::new(PathBuf::from("/tmp/out/invoice.csv"));
        assert_eq!(config.effective_source_name(), "invoice.csv");

        let config = config.with_source_name("statement.pdf".to_string());
        assert_eq!(config.effective_source_name(), "statement.pdf");
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_parse_options(ParseOptions::default().with_delimiter(';'))
            .with_output_format(OutputFormat::Html)
            .with_copy_table(true)
            .with_open_sheets(true)
            .with_download_dir(PathBuf::from("out"))
            .with_quiet(true);

        assert_eq!(config.parse.delimiter, ';');
        assert!(config.parse.trim);
        assert_eq!(config.output_format, OutputFormat::Html);
        assert!(config.copy_table && config.open_sheets && config.quiet);
        assert!(!config.copy_raw && !config.stats_only);
        assert_eq!(config.download_dir, Some(PathBuf::from("out")));
        assert_eq!(config.input, None);
    }
}
