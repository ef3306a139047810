/// seismicity_service: earthquake catalogue query and statistics.
///
/// # Module structure
///
/// ```text
/// seismicity_service
/// ├── model       - shared data types (EarthquakeEvent, QueryParameters, GRPoint, errors, …)
/// ├── config      - service configuration loader (seismicity.toml)
/// ├── spatial     - Haversine great-circle distance
/// ├── query       - query validation + single-pass event filter
/// ├── ingest
/// │   ├── catalogue - ISC-GEM CSV catalogue parser
/// │   ├── feed      - USGS GeoJSON live feed adapter
/// │   ├── fdsn      - FDSN event service URL construction + fetch
/// │   └── fixtures (test only) - representative catalogue/feed payloads
/// ├── analysis
/// │   ├── gutenberg_richter - cumulative frequency-magnitude curve, b-value
/// │   ├── binning           - magnitude/depth histograms, stats, energy
/// │   └── temporal          - daily timeline, hourly pattern, major events
/// └── report      - one-call pipeline producing a serialisable AnalysisReport
/// ```
///
/// Every operation is a pure function of its inputs. Callers own the parsed
/// catalogue and pass it in per query; nothing here holds global state.

/// Public modules
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod model;
pub mod query;
pub mod report;
pub mod spatial;
