/// Job description substituted whenever an upload cannot be turned into readable text.
/// Served verbatim; cleanup never touches it.
pub static FALLBACK_DOCUMENT: &str = include_str!("../../assets/fallback_jd.txt");
