//! Impossible-travel detection between two consecutive check-ins.

use super::geo;
use crate::core::policy::Policy;
use crate::models::attendance::AttendanceRecord;
use crate::models::coords::Coordinates;
use chrono::NaiveDateTime;

/// Last known whereabouts of a worker.
#[derive(Debug, Clone, Copy)]
pub struct PriorEvent {
    pub at: NaiveDateTime,
    pub coords: Option<Coordinates>,
}

impl From<&AttendanceRecord> for PriorEvent {
    fn from(rec: &AttendanceRecord) -> Self {
        Self {
            at: rec.effective_instant(),
            coords: Some(rec.effective_coords()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travel {
    pub elapsed_hours: f64,
    pub distance_km: f64,
    pub speed_kmh: f64,
}

/// Measure the move from `prior` to the new check-in.
///
/// `None` when there is nothing to compare against: no prior event, a
/// position missing on either side, or an elapsed time inside the
/// minimum window.
pub fn assess(
    prior: Option<&PriorEvent>,
    at: NaiveDateTime,
    coords: Option<Coordinates>,
    policy: &Policy,
) -> Option<Travel> {
    let prior = prior?;
    let from = prior.coords.filter(Coordinates::is_finite)?;
    let to = coords.filter(Coordinates::is_finite)?;

    let elapsed_hours = (at - prior.at).num_seconds() as f64 / 3600.0;
    if elapsed_hours <= policy.min_travel_window_hours {
        return None;
    }

    let distance_km = geo::distance_between(&from, &to) / 1000.0;
    Some(Travel {
        elapsed_hours,
        distance_km,
        speed_kmh: distance_km / elapsed_hours,
    })
}

pub fn is_impossible_travel(
    prior: Option<&PriorEvent>,
    at: NaiveDateTime,
    coords: Option<Coordinates>,
    policy: &Policy,
) -> bool {
    assess(prior, at, coords, policy)
        .is_some_and(|t| t.speed_kmh > policy.max_travel_speed_kmh)
}
