use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"(D|T12|T24)\(([^)]+)\)").unwrap())
}

fn zone_suffix_regex() -> &'static Regex {
    static ZONE_SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
    ZONE_SUFFIX_RE.get_or_init(|| Regex::new(r"^.*(Z|[+-]\d{2}:\d{2})?$").unwrap())
}

/// Replaces `D(...)`, `T12(...)` and `T24(...)` tokens with formatted
/// date/time strings. The payload must be an RFC 3339 date-time; tokens
/// with unparseable payloads stay untouched. Afterwards every remaining
/// literal `Z` in the line becomes `+00:00`, including `Z`s that were
/// never part of a date string.
pub fn format_dates_and_times(line: &str) -> String {
    let mut result = line.to_string();
    for captures in token_regex().captures_iter(line) {
        let token = captures.get(0).unwrap().as_str();
        let kind = captures.get(1).unwrap().as_str();
        let payload = captures.get(2).unwrap().as_str();

        if !zone_suffix_regex().is_match(payload) {
            warn!("malformed datetime: {payload}");
            continue;
        }
        let Ok(datetime) = DateTime::parse_from_rfc3339(payload) else {
            continue;
        };

        // times stay in the payload's own offset, no UTC conversion
        let formatted = match kind {
            "D" => datetime.format("%d %b %Y").to_string(),
            "T12" => with_zone_suffix(datetime.format("%I:%M%p"), payload, datetime.offset()),
            "T24" => with_zone_suffix(datetime.format("%H:%M"), payload, datetime.offset()),
            _ => continue,
        };
        result = result.replace(token, &formatted);
    }

    result.replace('Z', "+00:00")
}

/// The zone suffix is added whenever the payload contains a `+` or `-`
/// anywhere; the dashes of an ordinary date count, so in practice every
/// parseable payload gets the suffix.
fn with_zone_suffix(
    time: impl std::fmt::Display,
    payload: &str,
    offset: &FixedOffset,
) -> String {
    if payload.contains('+') || payload.contains('-') {
        format!("{time} ({})", zone_abbreviation(offset))
    } else {
        time.to_string()
    }
}

fn zone_abbreviation(offset: &FixedOffset) -> String {
    if offset.local_minus_utc() == 0 {
        "Z".to_string()
    } else {
        offset.to_string()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions_sorted::assert_eq_sorted;

    use super::format_dates_and_times;

    #[test]
    fn test_date() {
        assert_eq_sorted!(
            format_dates_and_times("D(2024-03-05T10:00:00Z)"),
            "05 Mar 2024"
        );
    }

    #[test]
    fn test_time_24h_with_offset() {
        assert_eq_sorted!(
            format_dates_and_times("T24(2024-03-05T10:00:00+02:00)"),
            "10:00 (+02:00)"
        );
    }

    #[test]
    fn test_time_24h_utc() {
        assert_eq_sorted!(
            format_dates_and_times("T24(2024-03-05T10:00:00Z)"),
            "10:00 (+00:00)"
        );
    }

    #[test]
    fn test_time_12h() {
        assert_eq_sorted!(
            format_dates_and_times("Boarding T12(2024-03-05T14:30:00-05:00)"),
            "Boarding 02:30PM (-05:00)"
        );
    }

    #[test]
    fn test_time_12h_morning_zero_padded() {
        assert_eq_sorted!(
            format_dates_and_times("T12(2024-03-05T09:05:00Z)"),
            "09:05AM (+00:00)"
        );
    }

    #[test]
    fn test_unparseable_payload_untouched() {
        assert_eq_sorted!(format_dates_and_times("D(notadate)"), "D(notadate)");
    }

    #[test]
    fn test_payload_without_zone_untouched() {
        // RFC 3339 requires an offset, so a zoneless payload never parses
        assert_eq_sorted!(
            format_dates_and_times("T24(2024-03-05T10:00:00)"),
            "T24(2024-03-05T10:00:00)"
        );
    }

    #[test]
    fn test_repeated_token_replaced_everywhere() {
        assert_eq_sorted!(
            format_dates_and_times("D(2024-03-05T10:00:00Z) and D(2024-03-05T10:00:00Z)"),
            "05 Mar 2024 and 05 Mar 2024"
        );
    }

    #[test]
    fn test_stray_z_rewritten() {
        assert_eq_sorted!(format_dates_and_times("Gate Z4"), "Gate +00:004");
    }

    #[test]
    fn test_no_tokens() {
        assert_eq_sorted!(format_dates_and_times("no dates here"), "no dates here");
    }
}
