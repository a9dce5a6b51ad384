use regex::Regex;
use std::sync::OnceLock;

fn vertical_whitespace_regex() -> &'static Regex {
    static VERTICAL_WS_RE: OnceLock<Regex> = OnceLock::new();
    VERTICAL_WS_RE.get_or_init(|| Regex::new(r"[\r\v\f]+").unwrap())
}

fn whitespace_regex() -> &'static Regex {
    static WS_RE: OnceLock<Regex> = OnceLock::new();
    WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn paragraph_regex() -> &'static Regex {
    static PARAGRAPH_RE: OnceLock<Regex> = OnceLock::new();
    PARAGRAPH_RE.get_or_init(|| Regex::new(r"\n{2,}").unwrap())
}

/// Cleans one line of itinerary text: vertical whitespace becomes a
/// newline, every whitespace run collapses to a single space, any
/// surviving run of 2+ newlines is kept as exactly a paragraph break,
/// and the ends are trimmed. Idempotent.
pub fn normalize_whitespace(line: &str) -> String {
    let line = vertical_whitespace_regex().replace_all(line, "\n");
    let line = whitespace_regex().replace_all(&line, " ");
    let line = paragraph_regex().replace_all(&line, "\n\n");
    line.trim().to_string()
}
