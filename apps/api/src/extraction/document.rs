use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MEDIA_TYPE: &str = "text/plain";

/// Formats the extractor accepts. Anything else is rejected at the upload boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the declared media type, falling back to the file suffix.
    pub fn detect(media_type: Option<&str>, file_name: &str) -> Option<Self> {
        media_type
            .and_then(Self::from_media_type)
            .or_else(|| Self::from_file_name(file_name))
    }

    /// Matches the media type essence, ignoring case and `;` parameters.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MEDIA_TYPE => Some(Self::Pdf),
            DOCX_MEDIA_TYPE => Some(Self::Docx),
            TEXT_MEDIA_TYPE => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if lower.ends_with(".txt") {
            Some(Self::PlainText)
        } else {
            None
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => PDF_MEDIA_TYPE,
            Self::Docx => DOCX_MEDIA_TYPE,
            Self::PlainText => TEXT_MEDIA_TYPE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "plain_text",
        }
    }

    /// Resumes sent for scoring must be PDF or DOCX.
    pub fn is_resume_format(&self) -> bool {
        matches!(self, Self::Pdf | Self::Docx)
    }
}

#[derive(Debug, Error)]
#[error("unsupported file type for '{file_name}': upload a PDF, DOCX, or TXT file")]
pub struct UnsupportedDocument {
    pub file_name: String,
    pub media_type: Option<String>,
}

/// An uploaded file with its resolved kind. The payload is read-only.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    file_name: String,
    media_type: Option<String>,
    kind: DocumentKind,
    bytes: Bytes,
}

impl SourceDocument {
    pub fn new(
        file_name: impl Into<String>,
        media_type: Option<String>,
        bytes: Bytes,
    ) -> Result<Self, UnsupportedDocument> {
        let file_name = file_name.into();
        match DocumentKind::detect(media_type.as_deref(), &file_name) {
            Some(kind) => Ok(Self {
                file_name,
                media_type,
                kind,
                bytes,
            }),
            None => Err(UnsupportedDocument {
                file_name,
                media_type,
            }),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        assert_eq!(
            DocumentKind::detect(None, "resume.PDF"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect(None, "Offer.Docx"),
            Some(DocumentKind::Docx)
        );
        assert_eq!(
            DocumentKind::detect(None, "notes.TXT"),
            Some(DocumentKind::PlainText)
        );
    }

    #[test]
    fn test_media_type_takes_precedence_over_suffix() {
        assert_eq!(
            DocumentKind::detect(Some("application/pdf"), "misleading.txt"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect(Some("text/plain"), "scan.pdf"),
            Some(DocumentKind::PlainText)
        );
    }

    #[test]
    fn test_media_type_parameters_and_case_are_ignored() {
        assert_eq!(
            DocumentKind::from_media_type("Text/Plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_media_type(DOCX_MEDIA_TYPE),
            Some(DocumentKind::Docx)
        );
    }

    #[test]
    fn test_unknown_media_type_falls_back_to_suffix() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), "jd.docx"),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::detect(Some(""), "jd.pdf"), Some(DocumentKind::Pdf));
    }

    #[test]
    fn test_unsupported_document_is_rejected() {
        let err = SourceDocument::new("photo.png", Some("image/png".to_string()), Bytes::new())
            .unwrap_err();
        assert_eq!(err.file_name, "photo.png");
        assert!(err.to_string().contains("PDF, DOCX, or TXT"));
    }

    #[test]
    fn test_resume_formats_exclude_plain_text() {
        assert!(DocumentKind::Pdf.is_resume_format());
        assert!(DocumentKind::Docx.is_resume_format());
        assert!(!DocumentKind::PlainText.is_resume_format());
    }

    #[test]
    fn test_source_document_keeps_payload() {
        let doc = SourceDocument::new("jd.txt", None, Bytes::from_static(b"hello")).unwrap();
        assert_eq!(doc.kind(), DocumentKind::PlainText);
        assert_eq!(doc.bytes(), b"hello");
        assert_eq!(doc.len(), 5);
        assert!(doc.media_type().is_none());
    }
}
