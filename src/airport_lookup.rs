use pest::Parser;
use pest_derive::Parser;
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use thiserror::Error;

use super::read_to_string;

#[derive(Parser)]
#[grammar = "pest/airport_lookup.pest"]
pub struct LookupParser;

/// Columns the lookup CSV must carry, resolved by name so the file may
/// order them freely.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "municipality",
    "icao_code",
    "iata_code",
    "iso_country",
    "coordinates",
];

#[derive(Error, Debug)]
pub enum AirportLookupError {
    #[error("airport lookup is empty")]
    Empty,
    #[error("failed to read airport lookup: {0}")]
    FileRead(#[from] io::Error),
    #[error("failed to parse airport lookup: {0}")]
    Parse(#[from] pest::error::Error<Rule>),
    #[error("airport lookup malformed: expected 6 columns in header, found {0}")]
    ColumnCount(usize),
    #[error("airport lookup malformed: missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("airport lookup malformed at line: {0}")]
    MalformedRow(String),
}

impl AirportLookupError {
    /// Schema problems abort the run with a non-zero status; a missing or
    /// empty lookup file is only reported and the run ends cleanly.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Empty | Self::FileRead(_))
    }
}

pub type AirportLookupResult = Result<AirportLookup, AirportLookupError>;

/// Code → display string map. A bare IATA/ICAO code resolves to the
/// airport name, the same code behind a `*` prefix to its municipality,
/// so every valid CSV row contributes exactly 4 entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AirportLookup(HashMap<String, String>);

impl AirportLookup {
    pub fn parse(content: &[u8]) -> AirportLookupResult {
        let unparsed_file = read_to_string(content)?;
        if unparsed_file.is_empty() {
            return Err(AirportLookupError::Empty);
        }

        let mut rows = LookupParser::parse(Rule::lookup, &unparsed_file)?
            .next()
            .unwrap()
            .into_inner()
            .filter(|pair| matches!(pair.as_rule(), Rule::row))
            .collect::<Vec<_>>();
        // a trailing newline parses as one final zero-width row
        if rows.last().is_some_and(|row| row.as_str().is_empty()) {
            rows.pop();
        }

        let mut rows = rows.into_iter();
        let header = rows.next().ok_or(AirportLookupError::Empty)?;
        let columns = header
            .into_inner()
            .map(|field| field.as_str())
            .collect::<Vec<_>>();
        if columns.len() != REQUIRED_COLUMNS.len() {
            return Err(AirportLookupError::ColumnCount(columns.len()));
        }
        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !columns.contains(required))
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(AirportLookupError::MissingColumns(missing));
        }
        let index_of = |name: &str| columns.iter().position(|column| *column == name).unwrap();
        let name_index = index_of("name");
        let municipality_index = index_of("municipality");
        let icao_index = index_of("icao_code");
        let iata_index = index_of("iata_code");

        let mut entries = HashMap::new();
        for row in rows {
            let line = row.as_str();
            let fields = row
                .into_inner()
                .map(|field| field.as_str())
                .collect::<Vec<_>>();
            if fields.len() != REQUIRED_COLUMNS.len() || fields.iter().any(|field| field.is_empty())
            {
                return Err(AirportLookupError::MalformedRow(line.to_string()));
            }

            let name = fields[name_index].trim();
            let municipality = fields[municipality_index].trim();
            let icao_code = fields[icao_index].trim();
            let iata_code = fields[iata_index].trim();

            entries.insert(iata_code.to_string(), name.to_string());
            entries.insert(icao_code.to_string(), name.to_string());
            entries.insert(format!("*{iata_code}"), municipality.to_string());
            entries.insert(format!("*{icao_code}"), municipality.to_string());
        }

        Ok(Self(entries))
    }

    /// Looks up the airport name for `code`, or its municipality when
    /// `municipality` is set.
    pub fn resolve(&self, code: &str, municipality: bool) -> Option<&str> {
        let value = if municipality {
            self.0.get(&format!("*{code}"))
        } else {
            self.0.get(code)
        };
        value.map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
