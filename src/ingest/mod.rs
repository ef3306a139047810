/// Catalogue ingest: raw source text → `Vec<EarthquakeEvent>`.
///
/// Submodules:
/// - `catalogue` - ISC-GEM CSV catalogue parser (bundled static file).
/// - `feed`      - USGS GeoJSON live feed adapter.
/// - `fdsn`      - FDSN event service URL construction and fetching.
/// - `fixtures`  - (test only) representative payloads.
///
/// Both raw shapes are normalised here, once, into the canonical record;
/// nothing downstream sees source-shaped data.

pub mod catalogue;
pub mod fdsn;
pub mod feed;
pub mod fixtures;

use log::info;

use crate::model::{EarthquakeEvent, FeedError};

/// Raw catalogue text tagged by the shape it arrives in.
#[derive(Debug, Clone, Copy)]
pub enum RawCatalogue<'a> {
    /// Comma-delimited ISC-GEM catalogue.
    IscGemCsv(&'a str),
    /// GeoJSON FeatureCollection from the FDSN event service.
    GeoJsonFeed(&'a str),
}

impl RawCatalogue<'_> {
    pub fn source_name(&self) -> &'static str {
        match self {
            RawCatalogue::IscGemCsv(_) => "ISC-GEM catalogue",
            RawCatalogue::GeoJsonFeed(_) => "USGS live feed",
        }
    }
}

/// Normalises either source shape into events, preserving source order.
///
/// # Errors
/// Only a structurally invalid GeoJSON document fails; CSV input never
/// does (malformed rows are dropped).
pub fn load_catalogue(raw: RawCatalogue<'_>) -> Result<Vec<EarthquakeEvent>, FeedError> {
    let events = match raw {
        RawCatalogue::IscGemCsv(text) => catalogue::parse_catalogue(text),
        RawCatalogue::GeoJsonFeed(json) => feed::parse_feed(json)?,
    };

    info!("Loaded {} events from {}", events.len(), raw.source_name());
    Ok(events)
}
