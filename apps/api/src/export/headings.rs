/// Section names rendered as headings even in mixed case.
const CANONICAL_HEADINGS: [&str; 5] = [
    "Professional Summary",
    "Key Skills",
    "Experience",
    "Education",
    "Projects",
];

/// A line is a heading when, trimmed and non-empty, it is all-uppercase
/// (at least one cased letter, no lowercase), ends with `:`, or is one of the
/// canonical section names.
pub fn is_heading(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    let all_upper =
        line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase);
    all_upper || line.ends_with(':') || CANONICAL_HEADINGS.contains(&line)
}

/// Display text of a heading line: trimmed, trailing `:` removed.
pub fn heading_text(line: &str) -> &str {
    line.trim().trim_end_matches(':')
}
