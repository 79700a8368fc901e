use libm::{atan2, cos, sin, sqrt};

/// Radius of the sphere the distance is measured on, in meters.
pub const EARTH_RADIUS: f64 = 6_372_795.0;

/// Great-circle distance in meters between two points given in signed decimal
/// degrees. The earth is taken to be a sphere, so expect errors up to 0.5%.
///
/// ```
/// # use vehicle_gps::distance_between;
/// assert_eq!(distance_between(52.0, 5.0, 52.0, 5.0), 0.0);
/// ```
#[must_use]
pub fn distance_between(lat1: f64, long1: f64, lat2: f64, long2: f64) -> f64 {
    let delta = (long1 - long2).to_radians();
    let (sdlong, cdlong) = (sin(delta), cos(delta));

    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let (slat1, clat1) = (sin(lat1), cos(lat1));
    let (slat2, clat2) = (sin(lat2), cos(lat2));

    let x = clat1 * slat2 - slat1 * clat2 * cdlong;
    let y = clat2 * sdlong;
    let numer = sqrt(x * x + y * y);
    let denom = slat1 * slat2 + clat1 * clat2 * cdlong;

    atan2(numer, denom) * EARTH_RADIUS
}
