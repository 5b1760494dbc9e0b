use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::Serialize;

const MAX_EXPERIENCE_LINES: usize = 5;
const MAX_EDUCATION_LINES: usize = 4;

static EXPERIENCE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\d+\s*\+?\s*years?\s*(?:of\s+)?experience",
        r"(?i)\d{4}\s*[-–—]\s*(?:present|\d{4})",
        r"(?i)\b(?:senior|junior|lead|manager|engineer|developer|designer|analyst|consultant|director|specialist|coordinator)",
        r"(?i)\bworked\s+(?:at|for|with)\b",
        r"(?i)\b(?:company|corporation|inc\.|ltd\.|llc)",
        // Job titles
        r"(?i)\bsoftware\s+engineer",
        r"(?i)\bproduct\s+(?:manager|designer)",
        r"(?i)\bfull\s*stack\s+developer",
        r"(?i)\bfront\s*end\s+(?:developer|engineer)",
        r"(?i)\bback\s*end\s+(?:developer|engineer)",
        r"(?i)\bdata\s+(?:scientist|analyst|engineer)",
        r"(?i)\bux/?ui\s+designer",
        r"(?i)\b(?:project\s+manager|technical\s+lead|team\s+lead)",
        r"(?i)\b(?:cto|ceo|coo|cfo)\b",
    ])
    .unwrap()
});

static EDUCATION_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\b(?:bachelor['’]?s?|b\.?tech|b\.?sc|b\.?[ase])(?:\.|\b)",
        r"(?i)\b(?:master['’]?s?|m\.?tech|m\.?sc|mba|m\.?[as])(?:\.|\b)",
        r"(?i)\b(?:ph\.?d|doctorate|doctoral)\b",
        r"(?i)\b(?:diploma|certificate|certification)\b",
        r"(?i)\b(?:university|college|institute|school\s+of)\b",
        r"(?i)\b(?:degree\s+in|graduated|major\s+in|studied)\b",
        r"(?i)\b(?:computer\s+science|information\s+technology|engineering|business\s+administration)\b",
    ])
    .unwrap()
});

/// One line of resume text, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLine {
    pub text: String,
}

/// Lines that look like work history: tenure, date ranges, roles, employers.
pub fn parse_experience(resume_text: &str) -> Vec<ParsedLine> {
    matching_lines(resume_text, &EXPERIENCE_PATTERNS, MAX_EXPERIENCE_LINES)
}

/// Lines that mention degrees, institutions or fields of study.
pub fn parse_education(resume_text: &str) -> Vec<ParsedLine> {
    matching_lines(resume_text, &EDUCATION_PATTERNS, MAX_EDUCATION_LINES)
}

fn matching_lines(resume_text: &str, patterns: &RegexSet, limit: usize) -> Vec<ParsedLine> {
    let mut found: Vec<ParsedLine> = Vec::new();

    for line in resume_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if found.len() == limit {
            break;
        }
        if patterns.is_match(line) && !found.iter().any(|p| p.text == line) {
            found.push(ParsedLine {
                text: line.to_string(),
            });
        }
    }

    found
}
