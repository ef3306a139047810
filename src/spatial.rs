/// Great-circle distance on a spherical Earth.
///
/// Inputs are degrees; latitudes in [-90, 90], longitudes in [-180, 180].
/// Out-of-range coordinates are not validated.

/// Mean Earth radius used by the Haversine formula, in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in km between two points given in degrees.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near the antipode
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
