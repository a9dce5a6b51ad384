use itertools::Itertools;
use std::io;

use crate::airport_lookup::AirportLookup;
use crate::codes::replace_codes;
use crate::datetime::format_dates_and_times;
use crate::normalize::normalize_whitespace;
use crate::read_to_string;

/// Runs the whole pipeline over an itinerary: per-line whitespace cleanup,
/// airport code substitution and date/time formatting, then a document-wide
/// blank line collapse. The returned text carries no trailing newline.
pub fn prettify(content: &[u8], lookup: &AirportLookup) -> Result<String, io::Error> {
    let text = read_to_string(content)?;
    let lines = text
        .lines()
        .map(|line| {
            let line = normalize_whitespace(line);
            let line = replace_codes(&line, lookup);
            format_dates_and_times(&line)
        })
        .collect::<Vec<_>>();

    Ok(collapse_blank_lines(&lines))
}

/// Drops trailing empty lines and reduces every run of consecutive blank
/// lines to a single one.
fn collapse_blank_lines(lines: &[String]) -> String {
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |index| index + 1);

    let mut blanks = 0;
    lines[..last]
        .iter()
        .filter(|line| {
            if line.trim().is_empty() {
                blanks += 1;
                blanks <= 1
            } else {
                blanks = 0;
                true
            }
        })
        .join("\n")
}
