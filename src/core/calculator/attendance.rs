//! Geofence validation and pay for a closed entry/exit pair.

use super::{geo, money};
use crate::core::policy::Policy;
use crate::errors::{AppResult, DataAnomaly};
use crate::models::coords::Coordinates;
use crate::models::site::Site;
use crate::models::worker::Worker;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// True iff the position lies inside the site's geofence (boundary included).
pub fn within_geofence(site: &Site, coords: Option<Coordinates>) -> bool {
    geo::distance(Some(site.center), coords) <= site.radius_m
}

/// Entry validity: inside the geofence and not flagged as impossible travel.
pub fn validate_entry(site: &Site, coords: Option<Coordinates>, fraud_flagged: bool) -> bool {
    !fraud_flagged && within_geofence(site, coords)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub worked_hours: Decimal,
    pub wage: Decimal,
    pub anomaly: Option<DataAnomaly>,
}

/// Hours between entry and exit on `date`, clamped at zero.
pub fn worked_hours(
    date: NaiveDate,
    entry: NaiveTime,
    exit: NaiveTime,
) -> (Decimal, Option<DataAnomaly>) {
    let entry_at = date.and_time(entry);
    let exit_at = date.and_time(exit);
    let secs = (exit_at - entry_at).num_seconds();

    if secs < 0 {
        let anomaly = DataAnomaly::ExitBeforeEntry {
            entry: entry_at,
            exit: exit_at,
        };
        return (Decimal::ZERO, Some(anomaly));
    }

    (money::hours_from_seconds(secs), None)
}

/// Flat daily rate from `full_day_hours` up, strictly proportional below.
pub fn wage_for(worked_hours: Decimal, worker: &Worker, policy: &Policy) -> AppResult<Decimal> {
    if worked_hours >= policy.full_day_hours {
        return Ok(worker.daily_rate);
    }
    let wage = money::mul(worker.hourly_rate, worked_hours, "wage")?;
    Ok(money::round_money(wage))
}

pub fn close_and_pay(
    date: NaiveDate,
    entry: NaiveTime,
    exit: NaiveTime,
    worker: &Worker,
    policy: &Policy,
) -> AppResult<Payment> {
    let (worked_hours, anomaly) = worked_hours(date, entry, exit);
    Ok(Payment {
        worked_hours,
        wage: wage_for(worked_hours, worker, policy)?,
        anomaly,
    })
}
