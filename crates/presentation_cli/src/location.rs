//! Reading event locations from files
//!
//! A file holds either a Ticketmaster Discovery event (anything with an
//! `_embedded` object) or a plain location object with `lat`/`lon` keys.

use std::path::Path;

use anyhow::{Context, Result};
use application::LocationInput;
use serde_json::Value;
use tracing::debug;

/// Parse a location document
pub fn parse_location(document: &str) -> Result<LocationInput> {
    let value: Value = serde_json::from_str(document).context("event file is not valid JSON")?;

    if value.get("_embedded").is_some() {
        debug!("Reading venue from Ticketmaster event");
        let event = LocationInput::from_ticketmaster_event(&value)?;
        return Ok(LocationInput::Structured(event));
    }

    Ok(LocationInput::from_json(value)?)
}

/// Read and parse a location file, `-` meaning stdin
pub fn read_location(path: &Path) -> Result<LocationInput> {
    let document = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_location(&document)
}
