//! Export layer: spreadsheet clipboard payload and raw CSV download

pub mod clipboard;
pub mod download;

pub use clipboard::{
    copy_raw, copy_table, quote_cell, to_clipboard_text, ClipboardSink, SystemClipboard, HOLDER_ENV,
};
#[cfg(target_os = "linux")]
pub use clipboard::hold_clipboard;
pub use download::{
    download_file_name, save_download, DownloadArtifact, StagedDownload, CSV_CONTENT_TYPE,
    DEFAULT_SOURCE_NAME,
};
