use crate::domain::Coordinates;

/// Earth radius used throughout the atlas, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two points via the Haversine formula.
///
/// Inputs are signed decimal degrees. No range validation is performed;
/// the result is deterministic and the function never fails.
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

pub fn distance_between(a: Coordinates, b: Coordinates) -> f64 {
    distance_miles(a.lat, a.lon, b.lat, b.lon)
}
