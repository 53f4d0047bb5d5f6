use crate::db::pool::DbPool;
use crate::db::{attendance, sites};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::site::Site;
use crate::models::{SiteId, WorkerId};
use chrono::NaiveDate;
use serde::Serialize;

/// A supervisor's view of one site for one day.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDashboard {
    pub site: Site,
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecord>,
    pub present: usize,
    /// Entries outside the geofence or flagged as impossible travel.
    pub gps_alerts: usize,
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn site_dashboard(
        pool: &mut DbPool,
        site_id: SiteId,
        date: NaiveDate,
    ) -> AppResult<SiteDashboard> {
        let site = sites::load_site(&pool.conn, site_id)?
            .ok_or_else(|| AppError::NotFound(format!("site {}", site_id)))?;
        let records = attendance::list_for_site_on(&pool.conn, site_id, &date)?;

        Ok(SiteDashboard {
            present: records.len(),
            gps_alerts: records.iter().filter(|r| !r.entry_valid).count(),
            site,
            date,
            records,
        })
    }

    /// Active sites assigned to `supervisor`.
    pub fn supervised_sites(pool: &mut DbPool, supervisor: WorkerId) -> AppResult<Vec<Site>> {
        sites::list_sites_for_supervisor(&pool.conn, supervisor)
    }
}
