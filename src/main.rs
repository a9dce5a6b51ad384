use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use itinerary_prettifier::airport_lookup::{AirportLookup, AirportLookupError};
use itinerary_prettifier::itinerary::prettify;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Normalizes a plain-text travel itinerary: collapses whitespace,
/// replaces airport code tokens with display names and reformats embedded
/// date/time tokens.
#[derive(Parser)]
#[command(name = "itinerary-prettifier")]
#[command(override_usage = "itinerary-prettifier ./input.txt ./output.txt ./airport-lookup.csv")]
struct Cli {
    /// Itinerary text to prettify
    input: PathBuf,
    /// Where the prettified itinerary is written
    output: PathBuf,
    /// Airport lookup CSV (name, municipality, icao_code, iata_code, ...)
    airport_lookup: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let lookup_bytes = match fs_err::read(&cli.airport_lookup) {
        Ok(bytes) => bytes,
        Err(_) => {
            error!("airport lookup not found: {}", cli.airport_lookup.display());
            return ExitCode::SUCCESS;
        }
    };
    let lookup = match AirportLookup::parse(&lookup_bytes) {
        Ok(lookup) => lookup,
        Err(err) => {
            report_lookup_error(&err);
            return if err.is_fatal() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let input_bytes = match fs_err::read(&cli.input) {
        Ok(bytes) => bytes,
        Err(_) => {
            error!("input not found: {}", cli.input.display());
            return ExitCode::SUCCESS;
        }
    };
    let prettified = match prettify(&input_bytes, &lookup) {
        Ok(prettified) => prettified,
        Err(err) => {
            error!("failed to read input: {err}");
            return ExitCode::SUCCESS;
        }
    };

    if let Err(err) = fs_err::write(&cli.output, prettified) {
        error!("failed to write output: {err}");
    }

    ExitCode::SUCCESS
}

/// Missing header columns are reported one by one so a caller sees every
/// problem with the file at once.
fn report_lookup_error(err: &AirportLookupError) {
    if let AirportLookupError::MissingColumns(columns) = err {
        for column in columns {
            error!("airport lookup malformed: missing '{column}' column");
        }
    } else {
        error!("{err}");
    }
}
