//! Readability gate: decides whether extracted text is prose or binary noise.
//!
//! Algorithm (all lengths in chars):
//! 1. Strip U+0000–U+001F and U+007F–U+009F, trim → clean text
//! 2. Reject if clean text is shorter than 100
//! 3. Reject if fewer than 20 runs of three or more ASCII letters
//! 4. Accept iff more than 70% of the clean text is letters, digits,
//!    whitespace or `.,;:!?'"()-`

use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_CLEAN_CHARS: usize = 100;
pub const MIN_WORDS: usize = 20;
pub const MIN_PRINTABLE_RATIO: f64 = 0.7;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]{3,}").unwrap());

/// The statistics behind a readability verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityReport {
    pub clean_chars: usize,
    pub word_count: usize,
    pub printable_ratio: f64,
}

impl ReadabilityReport {
    pub fn is_readable(&self) -> bool {
        self.clean_chars >= MIN_CLEAN_CHARS
            && self.word_count >= MIN_WORDS
            && self.printable_ratio > MIN_PRINTABLE_RATIO
    }
}

pub fn assess(text: &str) -> ReadabilityReport {
    let stripped: String = text.chars().filter(|c| !is_control(*c)).collect();
    let clean = stripped.trim();

    let clean_chars = clean.chars().count();
    let word_count = WORD_RE.find_iter(clean).count();
    let printable = clean.chars().filter(|c| is_prose_char(*c)).count();
    let printable_ratio = if clean_chars == 0 {
        0.0
    } else {
        printable as f64 / clean_chars as f64
    };

    ReadabilityReport {
        clean_chars,
        word_count,
        printable_ratio,
    }
}

pub fn is_readable(text: &str) -> bool {
    assess(text).is_readable()
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
}

fn is_prose_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || ".,;:!?'\"()-".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_floor_is_measured_after_trim() {
        // 100 chars with a trailing space → 99 after trim
        let text = "abc ".repeat(25);
        let report = assess(&text);
        assert_eq!(report.clean_chars, 99);
        assert!(!report.is_readable());
    }

    #[test]
    fn test_accepts_dense_words() {
        let text = "abcd ".repeat(25);
        let report = assess(&text);
        assert_eq!(report.word_count, 25);
        assert!(report.is_readable());
    }

    #[test]
    fn test_rejects_two_letter_tokens() {
        let text = "ab ".repeat(50);
        let report = assess(&text);
        assert_eq!(report.word_count, 0);
        assert!(!report.is_readable());
    }

    #[test]
    fn test_printable_ratio_boundary() {
        let words = "abcd ".repeat(25);
        // 125 prose chars out of 175 → 0.714
        assert!(is_readable(&format!("{words}{}", "#".repeat(50))));
        // 125 prose chars out of 185 → 0.676
        assert!(!is_readable(&format!("{words}{}", "#".repeat(60))));
    }

    #[test]
    fn test_control_characters_do_not_count_toward_length() {
        let text = format!("{}{}", "\u{1}".repeat(200), "word ".repeat(10));
        let report = assess(&text);
        assert_eq!(report.clean_chars, 49);
        assert!(!report.is_readable());
    }

    #[test]
    fn test_binary_noise_is_not_prose() {
        let bytes: Vec<u8> = (0x80..=0xffu8).cycle().take(600).collect();
        let text = String::from_utf8_lossy(&bytes);
        let report = assess(&text);
        assert_eq!(report.word_count, 0);
        assert!(report.printable_ratio < MIN_PRINTABLE_RATIO);
        assert!(!report.is_readable());
    }

    #[test]
    fn test_empty_text_is_unreadable() {
        let report = assess("");
        assert_eq!(report.clean_chars, 0);
        assert_eq!(report.printable_ratio, 0.0);
        assert!(!report.is_readable());
    }
}
