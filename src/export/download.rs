//! Raw CSV download file

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ExportError;

/// Content type attached to the download
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// Document name assumed when the original upload name is unknown
pub const DEFAULT_SOURCE_NAME: &str = "document.pdf";

const SUFFIX: &str = "_extracted.csv";

/// Name of the download file for a source document: `{stem}_extracted.csv`
pub fn download_file_name(source_name: &str) -> String {
    let name = if source_name.trim().is_empty() {
        DEFAULT_SOURCE_NAME
    } else {
        source_name
    };
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    format!("{}{}", stem, SUFFIX)
}

/// The raw extraction output packaged as a CSV file.
///
/// The bytes are the raw text as received. Trimming and blank-line
/// suppression only ever apply to the parsed view, never to the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    pub fn new(raw: &str, source_name: &str) -> Self {
        Self {
            file_name: download_file_name(source_name),
            content_type: CSV_CONTENT_TYPE,
            bytes: raw.as_bytes().to_vec(),
        }
    }

    /// Write the bytes to a temporary file in `dir`.
    ///
    /// The temporary file is removed when the returned handle is dropped
    /// unless [`StagedDownload::save`] is called first.
    pub fn stage(&self, dir: &Path) -> Result<StagedDownload, ExportError> {
        let mut file = tempfile::Builder::new()
            .prefix(".docugrid-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| ExportError::io("stage download in", dir, e))?;

        file.write_all(&self.bytes)
            .and_then(|_| file.flush())
            .map_err(|e| ExportError::io("write", file.path(), e))?;

        debug!(path = %file.path().display(), bytes = self.bytes.len(), "staged download");
        Ok(StagedDownload {
            file,
            target: dir.join(&self.file_name),
        })
    }
}

/// A download written to disk but not yet given its final name
#[derive(Debug)]
pub struct StagedDownload {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedDownload {
    /// Temporary location of the staged bytes
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Final location the download will be saved to
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the staged file to its final name, replacing any existing file
    pub fn save(self) -> Result<PathBuf, ExportError> {
        let Self { file, target } = self;
        file.persist(&target)
            .map_err(|e| ExportError::io("save", target.as_path(), e.error))?;
        info!(path = %target.display(), "saved download");
        Ok(target)
    }
}

/// Stage and save the raw text as `{stem}_extracted.csv` inside `dir`
pub fn save_download(raw: &str, source_name: &str, dir: &Path) -> Result<PathBuf, ExportError> {
    DownloadArtifact::new(raw, source_name).stage(dir)?.save()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name("invoice.pdf"), "invoice_extracted.csv");
        assert_eq!(download_file_name("Q3 report.v2.pdf"), "Q3 report.v2_extracted.csv");
        assert_eq!(download_file_name("scans/statement.PDF"), "statement_extracted.csv");
        assert_eq!(download_file_name("notes"), "notes_extracted.csv");
        assert_eq!(download_file_name(""), "document_extracted.csv");
    }

    #[test]
    fn test_artifact_keeps_raw_bytes() {
        let raw = "  a , b \r\n\r\n1,\"2\"\r\n";
        let artifact = DownloadArtifact::new(raw, "scan.pdf");

        assert_eq!(artifact.file_name, "scan_extracted.csv");
        assert_eq!(artifact.content_type, "text/csv;charset=utf-8");
        assert_eq!(artifact.bytes, raw.as_bytes());
    }

    #[test]
    fn test_save_download_writes_verbatim_file() {
        let dir = tempfile::tempdir().unwrap();
        let raw = "name , qty\n\nbolt,4";

        let path = save_download(raw, "parts.pdf", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("parts_extracted.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        save_download("old", "a.pdf", dir.path()).unwrap();

        let path = save_download("new", "a.pdf", dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_dropped_stage_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = DownloadArtifact::new("a,b\n", "x.pdf");

        for _ in 0..3 {
            let staged = artifact.stage(dir.path()).unwrap();
            assert!(staged.path().exists());
            assert_eq!(staged.target(), dir.path().join("x_extracted.csv"));
        }

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_saved_stage_releases_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = DownloadArtifact::new("a,b\n", "x.pdf");

        for _ in 0..3 {
            artifact.stage(dir.path()).unwrap().save().unwrap();
        }

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["x_extracted.csv"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = save_download("a", "x.pdf", Path::new("/nonexistent/dir")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/dir"));
    }
}
