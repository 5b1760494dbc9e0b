//! Heuristic DOCX text recovery: match WordprocessingML run-text elements
//! (`<w:t>…</w:t>`) directly against the raw container bytes.
//!
//! DOCX parts are normally deflate-compressed inside the ZIP, so this only finds
//! text when `word/document.xml` was stored uncompressed. `ExtractionMode::Structured`
//! unzips and parses the XML instead.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extraction::{collapse_whitespace, DocumentExtractor, Extraction, ExtractionError};

static RUN_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:t[^>]*>(.*?)</w:t>").unwrap());

pub struct HeuristicDocxExtractor;

impl HeuristicDocxExtractor {
    pub fn extract_text(&self, bytes: &[u8]) -> Extraction {
        let raw = String::from_utf8_lossy(bytes);

        let runs: Vec<&str> = RUN_TEXT_RE
            .captures_iter(&raw)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();

        if runs.is_empty() {
            debug!(bytes = bytes.len(), "no uncompressed <w:t> runs found");
            return Extraction::failed();
        }

        Extraction::check(collapse_whitespace(&runs.join(" ")))
    }
}

impl DocumentExtractor for HeuristicDocxExtractor {
    fn name(&self) -> &'static str {
        "docx-heuristic"
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError> {
        Ok(self.extract_text(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN: &str = "Senior Engineer role requiring five years experience in distributed systems";

    fn stored_docx(runs: usize, open_tag: &str) -> Vec<u8> {
        let mut bytes = b"PK\x03\x04\x14\x00\x00\x00\x00\x00word/document.xml".to_vec();
        bytes.extend_from_slice(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document><w:body>"#,
        );
        for _ in 0..runs {
            bytes.extend_from_slice(format!("<w:p><w:r>{open_tag}{RUN}</w:t></w:r></w:p>").as_bytes());
        }
        bytes.extend_from_slice(b"</w:body></w:document>PK\x01\x02\xff\xfe");
        bytes
    }

    #[test]
    fn test_recovers_stored_run_text() {
        let result = HeuristicDocxExtractor.extract_text(&stored_docx(15, "<w:t>"));
        assert!(result.success);
        assert!(result.text.starts_with(RUN));
        assert_eq!(result.text.matches(RUN).count(), 15);
        assert!(!result.text.contains('<'));
    }

    #[test]
    fn test_run_tags_with_attributes_match() {
        let result =
            HeuristicDocxExtractor.extract_text(&stored_docx(15, r#"<w:t xml:space="preserve">"#));
        assert!(result.success);
        assert!(!result.text.contains("xml:space"));
    }

    #[test]
    fn test_too_little_text_fails() {
        let result = HeuristicDocxExtractor.extract_text(&stored_docx(1, "<w:t>"));
        assert_eq!(result, Extraction::failed());
    }

    #[test]
    fn test_no_runs_fails() {
        let result = HeuristicDocxExtractor.extract_text(b"PK\x03\x04\x78\x9c\x01\x02garbage");
        assert_eq!(result, Extraction::failed());
    }
}
