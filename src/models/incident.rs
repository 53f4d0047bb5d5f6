use super::{IncidentId, SiteId, WorkerId};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IncidentReport {
    pub id: IncidentId,
    pub site_id: SiteId,
    pub supervisor_id: Option<WorkerId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
    pub affected: Vec<WorkerId>,
    /// Days the final delivery slips because of this incident.
    pub delay_days: Decimal,
    pub lost_hours: Decimal,
    pub lost_cost: Decimal,
    pub read: bool,
}

/// Input for filing an incident report.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub site_id: SiteId,
    pub supervisor_id: WorkerId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
    pub affected: Vec<WorkerId>,
    pub delay_days: Option<Decimal>,
}
