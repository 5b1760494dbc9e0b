//! Extraction pipeline: dispatches a `SourceDocument` to its strategy and applies
//! the fallback policy.
//!
//! 1. PDF / DOCX → configured extractor (heuristic or structured); plain text → lossy decode
//! 2. PDF / DOCX candidates must be > 50 chars and readable; plain text only readable
//! 3. Accepted text is cleaned, then re-checked so the returned text is itself readable
//! 4. Anything else → `FALLBACK_DOCUMENT` with `used_fallback = true`
//!
//! Extraction never fails from the caller's point of view.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::extraction::cleanup::clean_extracted_text;
use crate::extraction::docx::HeuristicDocxExtractor;
use crate::extraction::fallback::FALLBACK_DOCUMENT;
use crate::extraction::pdf::HeuristicPdfExtractor;
use crate::extraction::readability::assess;
use crate::extraction::structured::{StructuredDocxExtractor, StructuredPdfExtractor};
use crate::extraction::{DocumentExtractor, DocumentKind, Extraction, SourceDocument};

/// Which PDF/DOCX extractors the pipeline uses. Plain text is handled the same in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Pattern matching over raw bytes.
    #[default]
    Heuristic,
    /// Real PDF / ZIP+XML parsers.
    Structured,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Structured => "structured",
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(Self::Heuristic),
            "structured" => Ok(Self::Structured),
            other => Err(format!(
                "unknown extraction mode '{other}' (expected 'heuristic' or 'structured')"
            )),
        }
    }
}

/// What the caller gets back for every upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionOutcome {
    pub text: String,
    pub used_fallback: bool,
}

impl ExtractionOutcome {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_DOCUMENT.to_string(),
            used_fallback: true,
        }
    }
}

pub struct DocumentTextExtractor {
    mode: ExtractionMode,
    pdf: Box<dyn DocumentExtractor>,
    docx: Box<dyn DocumentExtractor>,
}

impl DocumentTextExtractor {
    pub fn new(mode: ExtractionMode) -> Self {
        let (pdf, docx): (Box<dyn DocumentExtractor>, Box<dyn DocumentExtractor>) = match mode {
            ExtractionMode::Heuristic => {
                (Box::new(HeuristicPdfExtractor), Box::new(HeuristicDocxExtractor))
            }
            ExtractionMode::Structured => {
                (Box::new(StructuredPdfExtractor), Box::new(StructuredDocxExtractor))
            }
        };
        Self { mode, pdf, docx }
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn extract(&self, document: &SourceDocument) -> ExtractionOutcome {
        let candidate = match document.kind() {
            _ if document.is_empty() => {
                debug!(file_name = document.file_name(), "empty upload");
                Extraction::failed()
            }
            DocumentKind::Pdf => run_extractor(self.pdf.as_ref(), document),
            DocumentKind::Docx => run_extractor(self.docx.as_ref(), document),
            DocumentKind::PlainText => {
                let text = String::from_utf8_lossy(document.bytes()).into_owned();
                Extraction::check_readable(text)
            }
        };

        let outcome = accept(candidate);

        info!(
            file_name = document.file_name(),
            kind = document.kind().as_str(),
            media_type = document.media_type().unwrap_or("-"),
            mode = self.mode.as_str(),
            bytes = document.len(),
            used_fallback = outcome.used_fallback,
            "document extracted"
        );

        outcome
    }
}

impl Default for DocumentTextExtractor {
    fn default() -> Self {
        Self::new(ExtractionMode::default())
    }
}

fn run_extractor(extractor: &dyn DocumentExtractor, document: &SourceDocument) -> Extraction {
    match extractor.extract(document.bytes()) {
        Ok(extraction) => extraction,
        Err(e) => {
            warn!(
                extractor = extractor.name(),
                file_name = document.file_name(),
                "extraction failed, using fallback: {e}"
            );
            Extraction::failed()
        }
    }
}

fn accept(candidate: Extraction) -> ExtractionOutcome {
    if !candidate.success {
        return ExtractionOutcome::fallback();
    }

    let cleaned = clean_extracted_text(&candidate.text);
    let report = assess(&cleaned);
    if !report.is_readable() {
        debug!(
            clean_chars = report.clean_chars,
            word_count = report.word_count,
            printable_ratio = report.printable_ratio,
            "cleaned text fell below the readability gate"
        );
        return ExtractionOutcome::fallback();
    }

    ExtractionOutcome {
        text: cleaned,
        used_fallback: false,
    }
}
