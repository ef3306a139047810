/// Test fixtures: representative catalogue and feed payloads.
///
/// The CSV fixture follows the ISC-GEM catalogue layout (comment block,
/// padded header, comma-separated rows with 14+ fields). The GeoJSON
/// fixture follows the USGS FDSN `format=geojson` envelope, trimmed to the
/// properties the adapter reads plus a few it ignores.

/// ISC-GEM excerpt: 5 well-formed rows and 3 malformed ones (short row,
/// non-numeric latitude, blank magnitude).
#[cfg(test)]
pub(crate) fn fixture_isc_gem_csv() -> &'static str {
    r#"#
# ISC-GEM Global Instrumental Earthquake Catalogue (1904-2018)
# Version 10.0
#
     date          ,   lat   ,   lon    ,smajax,sminax,strike, q , depth ,  unc ,  q ,  mw  , unc , q ,  s ,   eventid
1904-04-04 10:02:34.56,  41.802,   23.108,  7.3,  6.5, 118.2, C,  15.0,  4.8, C, 7.04, 0.20, C,  s,   610326
1906-04-18 13:12:21.00,  37.700, -122.500, 25.0, 15.0,  90.0, C,  10.0, 25.0, C, 7.90, 0.20, C,  s,   16958009
1906-04-18 13:12:21.00,  37.700
1960-05-22 19:11:20.00,  abc   ,  -73.407,  9.0,  5.2, 108.5, B,  25.0,  4.9, B, 9.55, 0.30, B,  s,   879136
1964-03-28 03:36:16.06,  60.908, -147.339,  4.6,  3.4,  83.1, A,  25.0,  3.0, A, 9.22, 0.20, A,  s,   869809
2004-12-26 00:58:52.05,   3.316,   95.854,  5.2,  3.6, 121.7, A,  26.1,  2.3, A,     , 0.20, A,  s,   7453151
2011-03-11 05:46:23.00,  38.296,  142.498,  2.6,  2.3, 114.6, A,  19.7,  1.6, A, 9.10, 0.20, A,  s,   16461282

2019-07-06 03:19:53.04,  35.766, -117.605,  2.8,  2.3,  75.3, A,  ,  3.0, A, 7.05, 0.20, A,  s,   38457511
"#
}

/// FDSN GeoJSON feed with three usable features and three that must be
/// skipped (null magnitude, missing time, short coordinate array).
#[cfg(test)]
pub(crate) fn fixture_geojson_feed() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "metadata": { "generated": 1594500000000, "title": "USGS Earthquakes", "status": 200, "count": 6 },
      "features": [
        {
          "type": "Feature",
          "properties": {
            "mag": 4.3, "place": "17km SW of Searles Valley, CA", "time": 1594440000000,
            "updated": 1594450000000, "tsunami": 0, "magType": "ml", "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [-117.5818333, 35.7695, 7.98] },
          "id": "nc73584926"
        },
        {
          "type": "Feature",
          "properties": { "mag": 2.6, "place": "", "time": 1594300000000, "tsunami": 0 },
          "geometry": { "type": "Point", "coordinates": [-155.2783, 19.4108, -1.2] },
          "id": "hv-above-datum"
        },
        {
          "type": "Feature",
          "properties": { "mag": 3.1, "place": "10km NE of Pahrump, NV", "time": 1594200000000, "tsunami": 0 },
          "geometry": { "type": "Point", "coordinates": [-115.90, 36.25, 12.0] },
          "id": "nn00755000"
        },
        {
          "type": "Feature",
          "properties": { "mag": null, "place": "quarry blast", "time": 1594100000000, "tsunami": 0 },
          "geometry": { "type": "Point", "coordinates": [-116.0, 36.0, 0.0] },
          "id": "ci-null-mag"
        },
        {
          "type": "Feature",
          "properties": { "mag": 2.9, "place": "no origin time" },
          "geometry": { "type": "Point", "coordinates": [-116.0, 36.0, 5.0] },
          "id": "ci-no-time"
        },
        {
          "type": "Feature",
          "properties": { "mag": 3.3, "place": "truncated geometry", "time": 1594000000000 },
          "geometry": { "type": "Point", "coordinates": [-116.0] },
          "id": "ci-short-coords"
        }
      ]
    }"#
}
