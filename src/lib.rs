//! docugrid - Permissive CSV codec for extracted tables
//!
//! Parses loosely formed CSV text into a table of strings, re-exports that
//! table as a tab-separated clipboard payload for spreadsheets, and saves the
//! raw text verbatim as a downloadable CSV file.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod parser;

pub use config::{Config, ParseOptions};
pub use error::{ClipboardError, ExportError};
pub use model::{Cell, Row, Table};
pub use parser::{parse, parse_with};
