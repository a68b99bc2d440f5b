//! Great-circle distance between coordinates.
//!
//! The one quirk worth knowing: an unknown coordinate yields a distance of
//! exactly `0.0`, not an error and not infinity. Places with no usable
//! position therefore sort as *nearest* in ascending order. This matches the
//! historical behaviour the rest of the app is calibrated against; revisit
//! deliberately, not in passing.

use crate::state::Coordinate;

/// Earth radius in kilometers used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in kilometers between two coordinates.
///
/// Returns `0.0` when either side is absent or has a zero-valued component
/// (a zero latitude/longitude is treated as "not set", like a falsy check).
/// Otherwise computes the haversine great-circle distance. Deterministic, no
/// side effects, no failure modes.
#[must_use]
pub fn distance_km(a: Option<&Coordinate>, b: Option<&Coordinate>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    if !is_usable(a) || !is_usable(b) {
        return 0.0;
    }
    let d_lat = deg_to_rad(b.latitude - a.latitude);
    let d_lon = deg_to_rad(b.longitude - a.longitude);
    let h = (d_lat / 2.0).sin().powi(2)
        + deg_to_rad(a.latitude).cos() * deg_to_rad(b.latitude).cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Whether both components carry a non-zero value.
fn is_usable(c: &Coordinate) -> bool {
    c.latitude != 0.0 && c.longitude != 0.0
}

/// Convert degrees to radians.
fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}
