//! Parser-backed extractors selected by `ExtractionMode::Structured`.
//!
//! PDF goes through `pdf-extract` (a content-stream interpreter); DOCX is unzipped
//! and `word/document.xml` walked with `quick-xml`. Both feed the same candidate
//! gate as the heuristics, so readability and fallback behave identically.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::extraction::{DocumentExtractor, Extraction, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Inflated size cap for `word/document.xml`. The upload limit only bounds the
/// compressed archive.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 16 * 1024 * 1024;

pub struct StructuredPdfExtractor;

impl DocumentExtractor for StructuredPdfExtractor {
    fn name(&self) -> &'static str {
        "pdf-structured"
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError> {
        // pdf-extract panics on some malformed inputs
        let text = match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(result) => result.map_err(|e| ExtractionError::Pdf(e.to_string()))?,
            Err(_) => return Err(ExtractionError::PdfPanic),
        };
        debug!(chars = text.len(), "pdf-extract returned text");
        Ok(Extraction::check(text.trim().to_string()))
    }
}

pub struct StructuredDocxExtractor;

impl DocumentExtractor for StructuredDocxExtractor {
    fn name(&self) -> &'static str {
        "docx-structured"
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError> {
        let xml = read_document_part(bytes, MAX_DOCUMENT_XML_BYTES)?;
        let text = document_text(&xml)?;
        debug!(chars = text.len(), "parsed {DOCUMENT_PART}");
        Ok(Extraction::check(text))
    }
}

/// Inflates `word/document.xml`, refusing to read past `limit` bytes whatever the
/// zip header claims.
fn read_document_part(bytes: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let part = archive.by_name(DOCUMENT_PART)?;
    if part.size() > limit {
        return Err(ExtractionError::DocumentTooLarge {
            size: part.size(),
            limit,
        });
    }

    let mut xml = String::new();
    part.take(limit + 1).read_to_string(&mut xml)?;
    if xml.len() as u64 > limit {
        return Err(ExtractionError::DocumentTooLarge {
            size: xml.len() as u64,
            limit,
        });
    }
    Ok(xml)
}

/// Collects `<w:t>` content; paragraph ends become newlines and `<w:tab/>` a space.
fn document_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => out.push(' '),
            Event::Text(t) if in_run_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    let lines: Vec<&str> = out
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    Ok(lines.join("\n"))
}
