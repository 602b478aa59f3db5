//! Tab-separated clipboard payload for pasting into a spreadsheet

use std::borrow::Cow;

use tracing::debug;

use crate::error::ClipboardError;
use crate::model::Table;

/// Destination for clipboard text
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Environment variable that starts the binary as a clipboard holder
pub const HOLDER_ENV: &str = "DOCUGRID_CLIPBOARD_HOLDER";

/// The desktop clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    hold: bool,
}

impl SystemClipboard {
    /// Connect to the system clipboard
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner, hold: false })
    }

    /// Keep the contents available after this process exits.
    ///
    /// On Linux the X11/Wayland selection is served by the process that set
    /// it, so each write also starts a detached copy of the current
    /// executable with [`HOLDER_ENV`] set, which must call [`hold_clipboard`].
    /// Elsewhere the system keeps the contents and this is a no-op.
    pub fn keep_after_exit(mut self) -> Self {
        self.hold = true;
        self
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        if self.hold {
            keep_alive(text)?;
        }
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn keep_alive(text: &str) -> Result<(), ClipboardError> {
    holder::spawn(text)
}

#[cfg(not(target_os = "linux"))]
fn keep_alive(_text: &str) -> Result<(), ClipboardError> {
    Ok(())
}

#[cfg(target_os = "linux")]
pub use holder::hold_clipboard;

#[cfg(target_os = "linux")]
mod holder {
    use std::io::{Read, Write};
    use std::os::unix::process::CommandExt;
    use std::path::Path;
    use std::process::{Command, Stdio};

    use arboard::SetExtLinux;
    use tracing::debug;

    use super::HOLDER_ENV;
    use crate::error::ClipboardError;

    pub(super) fn spawn(text: &str) -> Result<(), ClipboardError> {
        let exe = std::env::current_exe().map_err(|e| ClipboardError::HolderFailed(e.to_string()))?;
        let mut child = command(&exe)
            .spawn()
            .map_err(|e| ClipboardError::HolderFailed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::HolderFailed(e.to_string()))?;
        }
        debug!(pid = child.id(), "started clipboard holder");
        Ok(())
    }

    /// Detached from the terminal's process group so Ctrl-C in the shell
    /// does not clear the clipboard
    pub(super) fn command(exe: &Path) -> Command {
        let mut cmd = Command::new(exe);
        cmd.env(HOLDER_ENV, "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0);
        cmd
    }

    /// Serve stdin as the clipboard text until another application takes
    /// the selection over
    pub fn hold_clipboard() -> Result<(), ClipboardError> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| ClipboardError::HolderFailed(e.to_string()))?;

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set()
            .wait()
            .text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Quote a cell for a tab-separated paste.
///
/// Cells holding a tab, a line break or a quote are wrapped in quotes with
/// inner quotes doubled; anything else passes through untouched.
pub fn quote_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(['\t', '\n', '\r', '"']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Serialize a table as tab-separated text, one line per row
pub fn to_clipboard_text(table: &Table) -> String {
    let mut out = String::new();
    for (i, row) in table.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                out.push('\t');
            }
            out.push_str(&quote_cell(cell));
        }
    }
    out
}

/// Write the tab-separated table to the clipboard.
///
/// Returns the number of bytes written. A failed write is returned as is;
/// it is not retried.
pub fn copy_table(table: &Table, sink: &mut dyn ClipboardSink) -> Result<usize, ClipboardError> {
    let text = to_clipboard_text(table);
    sink.set_text(&text)?;
    debug!(rows = table.row_count(), bytes = text.len(), "copied table to clipboard");
    Ok(text.len())
}

/// Write the raw extraction text to the clipboard unchanged
pub fn copy_raw(raw: &str, sink: &mut dyn ClipboardSink) -> Result<usize, ClipboardError> {
    sink.set_text(raw)?;
    debug!(bytes = raw.len(), "copied raw text to clipboard");
    Ok(raw.len())
}
