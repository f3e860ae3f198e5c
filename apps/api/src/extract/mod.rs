//! Text extraction — turns an uploaded resume file into plain text.
//!
//! Dispatch is by the extension the client declared, never by sniffing the
//! bytes. Supported: `pdf`, `docx`, `txt` (case-insensitive, leading dot optional).

pub mod docx;
pub mod pdf;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format.")]
    UnsupportedFormat,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("File is not valid UTF-8 text")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Whether the caller can fix this by sending a different file type.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ExtractError::UnsupportedFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolves a declared extension (`"pdf"`, `".PDF"`, ...) to a format.
    pub fn from_extension(extension: Option<&str>) -> Result<Self, ExtractError> {
        let ext = extension
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .ok_or(ExtractError::UnsupportedFormat)?;

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(ExtractError::UnsupportedFormat),
        }
    }
}

/// Returns the extension of a client-supplied filename, if it has one.
pub fn declared_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_owned)
}

/// Extracts plain text from `file_path`, interpreting it as `declared_extension`.
///
/// Blocking: callers on the async runtime should run this via `spawn_blocking`.
pub fn extract_text(file_path: &Path, declared_extension: Option<&str>) -> Result<String, ExtractError> {
    match DocumentFormat::from_extension(declared_extension)? {
        DocumentFormat::Pdf => pdf::extract_pdf_text(file_path),
        DocumentFormat::Docx => docx::extract_docx_text(file_path),
        DocumentFormat::Txt => {
            let bytes = std::fs::read(file_path)?;
            Ok(String::from_utf8(bytes)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_extension(Some("PDF")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_extension(Some(".Docx")).unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_extension(Some("txt")).unwrap(),
            DocumentFormat::Txt
        );
    }

    #[test]
    fn test_unknown_or_missing_extension_is_unsupported() {
        for ext in [Some("csv"), Some("doc"), Some(""), None] {
            let err = DocumentFormat::from_extension(ext).unwrap_err();
            assert!(matches!(err, ExtractError::UnsupportedFormat), "{ext:?}");
        }
    }

    #[test]
    fn test_unsupported_format_message() {
        assert_eq!(
            ExtractError::UnsupportedFormat.to_string(),
            "Unsupported file format."
        );
        assert!(ExtractError::UnsupportedFormat.is_user_error());
        assert!(!ExtractError::Pdf("boom".into()).is_user_error());
    }

    #[test]
    fn test_declared_extension() {
        assert_eq!(declared_extension("cv.final.PDF").as_deref(), Some("PDF"));
        assert_eq!(declared_extension("resume.txt").as_deref(), Some("txt"));
        assert_eq!(declared_extension("resume"), None);
        assert_eq!(declared_extension(""), None);
    }

    #[test]
    fn test_txt_is_read_verbatim() {
        let body = "  Jane Doe\nRust engineer\n\n";
        let file = write_temp(body.as_bytes());
        let text = extract_text(file.path(), Some("txt")).unwrap();
        assert_eq!(text, body);
    }

    #[test]
    fn test_txt_rejects_invalid_utf8() {
        let file = write_temp(&[0xff, 0xfe, 0x00, 0x41]);
        let err = extract_text(file.path(), Some("txt")).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUtf8(_)));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_unsupported_extension_does_not_touch_file() {
        let file = write_temp(b"name,skill\njane,rust\n");
        let err = extract_text(file.path(), Some("csv")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_text(&dir.path().join("gone.txt"), Some("txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
