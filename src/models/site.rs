use super::{SiteId, WorkerId, coords::Coordinates};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub address: String,
    pub center: Coordinates,
    /// Geofence radius in meters.
    pub radius_m: f64,
    pub total_budget: Decimal,
    pub penalty_per_day: Decimal,
    pub start_date: NaiveDate,
    pub estimated_end_date: NaiveDate,
    pub supervisor_id: Option<WorkerId>,
    pub active: bool,
}

impl Site {
    /// Whole days from start to estimated end.
    pub fn contract_days(&self) -> i64 {
        (self.estimated_end_date - self.start_date).num_days()
    }
}

/// Input for registering a site.
#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub address: String,
    pub center: Coordinates,
    pub radius_m: f64,
    pub total_budget: Decimal,
    pub penalty_per_day: Decimal,
    pub start_date: NaiveDate,
    pub estimated_end_date: NaiveDate,
    pub supervisor_id: Option<WorkerId>,
}
