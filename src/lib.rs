use std::io;

use tracing::warn;

pub mod airport_lookup;
pub mod codes;
pub mod datetime;
pub mod itinerary;
pub mod normalize;

/// Itinerary and lookup files are usually UTF-8 but occasionally arrive as
/// latin-1 exports; fall back to WINDOWS-1252 instead of failing.
fn read_to_string(contents: &[u8]) -> Result<String, io::Error> {
    String::from_utf8(contents.to_vec()).or_else(|_| {
        let (string, _, errors) = encoding_rs::WINDOWS_1252.decode(contents);
        if errors {
            warn!("errors while decoding win-1252");
        }
        Ok(string.to_string())
    })
}
