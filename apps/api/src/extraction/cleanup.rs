use crate::extraction::collapse_whitespace;

/// Normalizes accepted extraction output into single-spaced printable ASCII.
///
/// Control characters are dropped first, whitespace is collapsed, and anything
/// outside 0x20–0x7E is removed. Whitespace is collapsed once more so that
/// removed characters never leave double spaces behind; the function is idempotent.
pub fn clean_extracted_text(text: &str) -> String {
    let without_controls: String = text.chars().filter(|c| !is_stripped_control(*c)).collect();
    let collapsed = collapse_whitespace(&without_controls);
    let ascii: String = collapsed
        .chars()
        .filter(|c| matches!(c, ' '..='~' | '\n' | '\r' | '\t'))
        .collect();
    collapse_whitespace(&ascii)
}

// Tab, LF and CR survive this step and are folded into spaces by the collapse.
fn is_stripped_control(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{7f}'..='\u{9f}'
    )
}
