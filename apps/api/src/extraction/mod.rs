// Document text extraction for uploaded JDs and resumes.
// Every upload ends in a readable string: either text recovered from the file
// or the fallback JD when recovery is not trustworthy.

pub mod cleanup;
pub mod document;
pub mod docx;
pub mod fallback;
pub mod handlers;
pub mod pdf;
pub mod pipeline;
pub mod readability;
pub mod structured;

use thiserror::Error;

use crate::extraction::readability::is_readable;

pub use document::{DocumentKind, SourceDocument, UnsupportedDocument};
pub use pipeline::{DocumentTextExtractor, ExtractionMode, ExtractionOutcome};

/// PDF/DOCX candidates must be longer than this (in chars) before the readability gate runs.
pub const MIN_CANDIDATE_CHARS: usize = 50;

/// Internal extraction failures. These never reach API callers: the pipeline
/// logs them and substitutes the fallback document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("PDF parser panicked")]
    PdfPanic,

    #[error("document part is {size} bytes inflated, limit is {limit}")]
    DocumentTooLarge { size: u64, limit: u64 },
}

/// Output of a single extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub success: bool,
}

impl Extraction {
    pub fn failed() -> Self {
        Self {
            text: String::new(),
            success: false,
        }
    }

    /// Accepts `text` if it is longer than `MIN_CANDIDATE_CHARS` and readable.
    pub fn check(text: String) -> Self {
        if text.chars().count() > MIN_CANDIDATE_CHARS && is_readable(&text) {
            Self {
                text,
                success: true,
            }
        } else {
            Self::failed()
        }
    }

    /// Accepts `text` on readability alone. Used for plain-text uploads.
    pub fn check_readable(text: String) -> Self {
        if is_readable(&text) {
            Self {
                text,
                success: true,
            }
        } else {
            Self::failed()
        }
    }
}

/// A pluggable extraction strategy for one binary format.
///
/// Carried in `DocumentTextExtractor` as `Box<dyn DocumentExtractor>`, chosen by
/// `ExtractionMode` at startup.
pub trait DocumentExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError>;
}

/// Collapses every whitespace run to one space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROSE: &str = "We are hiring a backend engineer to design payment services, \
        review pull requests, mentor junior colleagues and improve reliability across \
        our lending platform every single quarter.";

    #[test]
    fn test_collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
    }

    #[test]
    fn test_check_rejects_short_text() {
        let result = Extraction::check("Senior Engineer".to_string());
        assert_eq!(result, Extraction::failed());
    }

    #[test]
    fn test_check_accepts_prose() {
        let result = Extraction::check(PROSE.to_string());
        assert!(result.success);
        assert_eq!(result.text, PROSE);
    }

    #[test]
    fn test_check_readable_has_no_length_prefilter() {
        // Readability already demands 100 chars, so the two gates agree on prose.
        assert!(Extraction::check_readable(PROSE.to_string()).success);
        assert!(!Extraction::check_readable("tiny".to_string()).success);
    }
}
