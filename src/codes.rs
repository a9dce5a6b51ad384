use regex::Regex;
use std::sync::OnceLock;

use crate::airport_lookup::AirportLookup;

fn iata_regex() -> &'static Regex {
    static IATA_RE: OnceLock<Regex> = OnceLock::new();
    IATA_RE.get_or_init(|| Regex::new(r"(?i)\*?#[A-Z]{3}").unwrap())
}

fn icao_regex() -> &'static Regex {
    static ICAO_RE: OnceLock<Regex> = OnceLock::new();
    ICAO_RE.get_or_init(|| Regex::new(r"(?i)\*?##[A-Z]{4}").unwrap())
}

/// Replaces `#XXX`/`##XXXX` airport code tokens with the airport name and
/// their `*`-prefixed variants with the municipality. IATA tokens are
/// resolved before ICAO tokens; unknown codes stay untouched.
///
/// Tokens are scanned on the incoming line and swapped out by literal
/// whole-line replacement, so a token text occurring several times is
/// replaced everywhere at once.
pub fn replace_codes(line: &str, lookup: &AirportLookup) -> String {
    let mut result = line.to_string();
    for token_match in iata_regex()
        .find_iter(line)
        .chain(icao_regex().find_iter(line))
    {
        let token = token_match.as_str();
        let municipality = token.starts_with('*');
        let code = token.trim_start_matches(['*', '#']).to_ascii_uppercase();
        if let Some(value) = lookup.resolve(&code, municipality) {
            result = result.replace(token, value);
        }
    }

    result
}
