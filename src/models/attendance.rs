use super::{RecordId, SiteId, WorkerId, coords::Coordinates};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub worker_id: WorkerId,
    pub site_id: SiteId,
    pub date: NaiveDate,

    pub entry_time: NaiveTime,
    pub entry_coords: Coordinates,
    pub entry_photo: Option<String>,
    pub client_ip: Option<String>,

    pub exit_time: Option<NaiveTime>,
    pub exit_coords: Option<Coordinates>,
    pub exit_photo: Option<String>,

    pub worked_hours: Decimal,
    /// None until the exit is marked.
    pub wage: Option<Decimal>,
    pub entry_valid: bool,
    /// The entry was forced invalid by the impossible-travel check.
    pub fraud_flagged: bool,

    pub modified_by: Option<WorkerId>,
    pub modified_at: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }

    /// Last known instant: exit if marked, entry otherwise.
    pub fn effective_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.exit_time.unwrap_or(self.entry_time))
    }

    /// Last known position: exit if marked, entry otherwise.
    pub fn effective_coords(&self) -> Coordinates {
        self.exit_coords.unwrap_or(self.entry_coords)
    }
}

/// A check-in as supplied by the caller, before validation.
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub timestamp: NaiveDateTime,
    pub coords: Option<Coordinates>,
    pub photo: Option<String>,
    pub client_ip: Option<String>,
}
