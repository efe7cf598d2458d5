//! File input and type validation
//!
//! A submitted file carries a display name, a declared content type and
//! lazily-read bytes. Only PDF documents are accepted.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ValidationError;

/// The only content type accepted for ingestion.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A file selected by the user for ingestion.
#[async_trait]
pub trait SelectedFile: Send + Sync {
    /// Name shown to the user.
    fn name(&self) -> &str;

    /// Declared content type, if the source provided one.
    fn content_type(&self) -> Option<&str>;

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
}

/// Checks that a declared content type is exactly the PDF MIME type.
pub fn validate_content_type(declared: Option<&str>) -> Result<(), ValidationError> {
    match declared {
        Some(PDF_MIME_TYPE) => Ok(()),
        other => Err(ValidationError {
            expected: PDF_MIME_TYPE,
            declared: other.map(str::to_string),
        }),
    }
}

/// Content type declared for a path on disk, based on its extension.
///
/// Only `.pdf` (any case) declares a type; every other path declares none.
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension().and_then(|ext| ext.to_str())?;

    extension.eq_ignore_ascii_case("pdf").then_some(PDF_MIME_TYPE)
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    content_type: Option<&'static str>,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let content_type = content_type_for_path(&path);

        Self {
            path,
            name,
            content_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SelectedFile for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// A file whose bytes are already in memory.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    /// A file declared as a PDF.
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(name, Some(PDF_MIME_TYPE), bytes)
    }
}

#[async_trait]
impl SelectedFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_type() {
        assert!(validate_content_type(Some("application/pdf")).is_ok());

        let err = validate_content_type(Some("text/plain")).unwrap_err();
        assert_eq!(err.declared.as_deref(), Some("text/plain"));
        assert_eq!(err.expected, PDF_MIME_TYPE);

        assert!(validate_content_type(None).is_err());
        // Exact match only
        assert!(validate_content_type(Some("APPLICATION/PDF")).is_err());
        assert!(validate_content_type(Some("application/pdf; charset=binary")).is_err());
    }

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(content_type_for_path(Path::new("report.pdf")), Some(PDF_MIME_TYPE));
        assert_eq!(content_type_for_path(Path::new("REPORT.PDF")), Some(PDF_MIME_TYPE));
        assert_eq!(content_type_for_path(Path::new("notes.txt")), None);
        assert_eq!(content_type_for_path(Path::new("report.pdf.docx")), None);
        assert_eq!(content_type_for_path(Path::new("archive.tar.xyz")), None);
        assert_eq!(content_type_for_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_local_file_name_and_type() {
        let file = LocalFile::new("/tmp/reports/q4-summary.pdf");
        assert_eq!(file.name(), "q4-summary.pdf");
        assert_eq!(file.content_type(), Some(PDF_MIME_TYPE));
        assert_eq!(file.path(), Path::new("/tmp/reports/q4-summary.pdf"));
    }

    #[tokio::test]
    async fn test_memory_file_returns_bytes() {
        let file = MemoryFile::pdf("in-memory.pdf", b"%PDF-1.5".to_vec());
        assert_eq!(file.content_type(), Some(PDF_MIME_TYPE));
        assert_eq!(file.read_bytes().await.unwrap(), b"%PDF-1.5".to_vec());
    }
}
