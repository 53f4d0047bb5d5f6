use crate::models::coords::Coordinates;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Returned whenever a position is missing or not numeric. Callers treat it
/// as "outside any geofence".
pub const UNREACHABLE_M: f64 = 999_999.0;

/// Great-circle distance in meters (Haversine).
pub fn distance(a: Option<Coordinates>, b: Option<Coordinates>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => distance_between(&a, &b),
        _ => UNREACHABLE_M,
    }
}

pub fn distance_between(a: &Coordinates, b: &Coordinates) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return UNREACHABLE_M;
    }

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
