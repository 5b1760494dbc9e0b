//! Heuristic PDF text recovery without a PDF parser.
//!
//! The byte stream is decoded as lossy UTF-8 and scanned twice:
//! 1. Literal strings `(...)`, the operands of PDF text-showing operators,
//!    keeping those with at least two consecutive letters
//! 2. Any run of 20+ prose characters starting with a letter
//!
//! The first pass whose joined output clears the candidate gate wins.
//! Compressed content streams defeat both passes; the pipeline's fallback
//! document absorbs those failures.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extraction::{collapse_whitespace, DocumentExtractor, Extraction, ExtractionError};

static LITERAL_STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static LETTER_PAIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{2}").unwrap());
static PROSE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[A-Za-z][A-Za-z0-9 .,;:'"!?()\-]{19,}"#).unwrap());

pub struct HeuristicPdfExtractor;

impl HeuristicPdfExtractor {
    pub fn extract_text(&self, bytes: &[u8]) -> Extraction {
        let raw = String::from_utf8_lossy(bytes);

        let literals = Extraction::check(literal_string_pass(&raw));
        if literals.success {
            debug!(chars = literals.text.len(), "PDF literal-string pass accepted");
            return literals;
        }

        let runs = Extraction::check(prose_run_pass(&raw));
        if runs.success {
            debug!(chars = runs.text.len(), "PDF prose-run pass accepted");
            return runs;
        }

        debug!(bytes = bytes.len(), "PDF heuristic passes found no readable text");
        Extraction::failed()
    }
}

impl DocumentExtractor for HeuristicPdfExtractor {
    fn name(&self) -> &'static str {
        "pdf-heuristic"
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError> {
        Ok(self.extract_text(bytes))
    }
}

fn literal_string_pass(raw: &str) -> String {
    let captures: Vec<&str> = LITERAL_STRING_RE
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| LETTER_PAIR_RE.is_match(s))
        .collect();
    collapse_whitespace(&captures.join(" "))
}

fn prose_run_pass(raw: &str) -> String {
    let runs: Vec<&str> = PROSE_RUN_RE.find_iter(raw).map(|m| m.as_str()).collect();
    collapse_whitespace(&runs.join(" "))
}
