//! docugrid - Permissive CSV codec for extracted tables

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docugrid::config::{Config, OutputFormat, ParseOptions};
use docugrid::export::{self, ClipboardSink, SystemClipboard};
use docugrid::output::render_to_stdout;
use docugrid::parser::{is_demo_payload, parse_with, read_source};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Html,
    Tsv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Html => OutputFormat::Html,
            CliOutputFormat::Tsv => OutputFormat::Tsv,
        }
    }
}

/// View, copy and export CSV text produced by a table extraction
#[derive(Parser, Debug)]
#[command(name = "docugrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raw CSV text to read (stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Field delimiter of the input ("tab" for tab-separated)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: char,

    /// Keep leading/trailing whitespace in cells
    #[arg(long)]
    no_trim: bool,

    /// Copy the table to the clipboard as tab-separated text for spreadsheets
    #[arg(long)]
    copy: bool,

    /// Copy the raw CSV text to the clipboard
    #[arg(long, conflicts_with = "copy")]
    copy_raw: bool,

    /// After --copy, open a new Google Sheets spreadsheet to paste into
    #[arg(long, requires = "copy")]
    open_sheets: bool,

    /// Save the raw CSV text as <name>_extracted.csv in this directory
    #[arg(long, value_name = "DIR")]
    download: Option<PathBuf>,

    /// Name of the original document, used for the download file name
    #[arg(long, value_name = "NAME")]
    source_name: Option<String>,

    /// Only show row and column counts
    #[arg(long)]
    stats_only: bool,

    /// Do not print the table
    #[arg(short, long)]
    quiet: bool,
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "tab" | "\\t" => Ok('\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some('"'), None) => Err("the quote character cannot be a delimiter".to_string()),
                (Some('\r' | '\n'), None) => Err("a line break cannot be a delimiter".to_string()),
                (Some(c), None) => Ok(c),
                _ => Err(format!("delimiter must be a single character, got {:?}", s)),
            }
        }
    }
}

const NEW_SHEET_URL: &str = "https://sheets.new";

fn main() -> ExitCode {
    if std::env::var_os(export::HOLDER_ENV).is_some() {
        return hold_clipboard();
    }

    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Holder mode, started by `SystemClipboard::keep_after_exit`
#[cfg(target_os = "linux")]
fn hold_clipboard() -> ExitCode {
    match export::hold_clipboard() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(2),
    }
}

#[cfg(not(target_os = "linux"))]
fn hold_clipboard() -> ExitCode {
    ExitCode::from(2)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.input {
        Some(path) => Config::new(path),
        None => Config::default(),
    }
    .with_parse_options(
        ParseOptions::default()
            .with_delimiter(cli.delimiter)
            .with_trim(!cli.no_trim),
    )
    .with_output_format(cli.format.into())
    .with_copy_table(cli.copy)
    .with_copy_raw(cli.copy_raw)
    .with_open_sheets(cli.open_sheets)
    .with_stats_only(cli.stats_only)
    .with_quiet(cli.quiet);
    if let Some(name) = cli.source_name {
        config = config.with_source_name(name);
    }
    if let Some(dir) = cli.download {
        config = config.with_download_dir(dir);
    }

    let raw = read_source(config.input.as_deref())?;

    if is_demo_payload(&raw) {
        status(
            Color::Yellow,
            "Demo",
            "showing sample data, not an extraction of your document",
        )?;
    }

    let started = Instant::now();
    let table = parse_with(&raw, &config.parse);
    info!(
        rows = table.row_count(),
        columns = table.max_width(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "parsed input"
    );

    if config.stats_only {
        println!("Rows:      {}", table.row_count());
        println!("Data rows: {}", table.data_rows().len());
        println!("Columns:   {}", table.max_width());
        println!("Ragged:    {}", if table.is_ragged() { "yes" } else { "no" });
    } else if !config.quiet {
        render_to_stdout(&table, config.output_format)?;
    }

    // Download first: a clipboard failure ends the run
    if let Some(ref dir) = config.download_dir {
        let path = export::save_download(&raw, &config.effective_source_name(), dir)?;
        status(Color::Green, "Saved", &path.display().to_string())?;
    }

    if config.copy_table || config.copy_raw {
        let copied = copy_to_clipboard(&config, &raw, &table)
            .context("Failed to copy to clipboard automatically. Please check permissions.")?;
        status(Color::Green, "Copied", &copied)?;

        if config.open_sheets {
            match open_in_browser(NEW_SHEET_URL) {
                Ok(()) => status(Color::Green, "Opened", NEW_SHEET_URL)?,
                Err(e) => {
                    warn!(error = %e, "could not start a browser");
                    status(Color::Yellow, "Open", &format!("{} and paste", NEW_SHEET_URL))?;
                }
            }
        }
    }

    Ok(())
}

fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut cmd = std::process::Command::new("open");
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut cmd = std::process::Command::new("xdg-open");

    cmd.arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}

fn copy_to_clipboard(config: &Config, raw: &str, table: &docugrid::Table) -> Result<String> {
    let mut clipboard = SystemClipboard::new()?.keep_after_exit();
    let sink: &mut dyn ClipboardSink = &mut clipboard;

    if config.copy_raw {
        let bytes = export::copy_raw(raw, sink)?;
        Ok(format!("raw CSV ({} bytes)", bytes))
    } else {
        export::copy_table(table, sink)?;
        Ok(format!(
            "{} rows; paste into cell A1 of a new spreadsheet",
            table.row_count()
        ))
    }
}

fn status(color: Color, label: &str, message: &str) -> Result<()> {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stderr, "{:>8}", label)?;
    stderr.reset()?;
    writeln!(stderr, " {}", message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(','));
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("tab"), Ok('\t'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("\n").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_open_sheets_requires_copy() {
        assert!(Cli::try_parse_from(["docugrid", "--open-sheets"]).is_err());
        assert!(Cli::try_parse_from(["docugrid", "--copy-raw", "--open-sheets"]).is_err());

        let cli = Cli::try_parse_from(["docugrid", "--copy", "--open-sheets"]).unwrap();
        assert!(cli.copy && cli.open_sheets);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
