use crate::db::db_utils::{
    date_str, datetime_str, get_bool, get_date, get_decimal, get_opt_datetime, get_opt_decimal,
    get_opt_time, get_time, time_str,
};
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::coords::Coordinates;
use crate::models::{RecordId, SiteId, WorkerId};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let exit_lat: Option<f64> = row.get("exit_lat")?;
    let exit_lon: Option<f64> = row.get("exit_lon")?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        site_id: row.get("site_id")?,
        date: get_date(row, "date")?,
        entry_time: get_time(row, "entry_time")?,
        entry_coords: Coordinates::new(row.get("entry_lat")?, row.get("entry_lon")?),
        entry_photo: row.get("entry_photo")?,
        client_ip: row.get("client_ip")?,
        exit_time: get_opt_time(row, "exit_time")?,
        exit_coords: match (exit_lat, exit_lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        },
        exit_photo: row.get("exit_photo")?,
        worked_hours: get_decimal(row, "worked_hours")?,
        wage: get_opt_decimal(row, "wage")?,
        entry_valid: get_bool(row, "entry_valid")?,
        fraud_flagged: get_bool(row, "fraud_flagged")?,
        modified_by: row.get("modified_by")?,
        modified_at: get_opt_datetime(row, "modified_at")?,
    })
}

fn collect(stmt: &mut rusqlite::Statement<'_>, p: impl rusqlite::Params) -> AppResult<Vec<AttendanceRecord>> {
    let rows = stmt.query_map(p, map_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a freshly opened record; `rec.id` is ignored.
pub fn insert_entry(
    conn: &Connection,
    rec: &AttendanceRecord,
    created_at: NaiveDateTime,
) -> AppResult<RecordId> {
    conn.execute(
        "INSERT INTO attendance (worker_id, site_id, date, entry_time, entry_lat, entry_lon,
                                 entry_photo, client_ip, worked_hours, wage, entry_valid,
                                 fraud_flagged, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10, ?11, ?12)",
        params![
            rec.worker_id,
            rec.site_id,
            date_str(&rec.date),
            time_str(&rec.entry_time),
            rec.entry_coords.lat,
            rec.entry_coords.lon,
            rec.entry_photo,
            rec.client_ip,
            rec.worked_hours.to_string(),
            rec.entry_valid as i64,
            rec.fraud_flagged as i64,
            datetime_str(&created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Persist every mutable column of an existing record.
pub fn update_record(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    conn.execute(
        "UPDATE attendance
         SET entry_time = ?1, exit_time = ?2, exit_lat = ?3, exit_lon = ?4, exit_photo = ?5,
             worked_hours = ?6, wage = ?7, modified_by = ?8, modified_at = ?9
         WHERE id = ?10",
        params![
            time_str(&rec.entry_time),
            rec.exit_time.as_ref().map(time_str),
            rec.exit_coords.map(|c| c.lat),
            rec.exit_coords.map(|c| c.lon),
            rec.exit_photo,
            rec.worked_hours.to_string(),
            rec.wage.map(|w| w.to_string()),
            rec.modified_by,
            rec.modified_at.as_ref().map(datetime_str),
            rec.id,
        ],
    )?;
    Ok(())
}

pub fn load_record(conn: &Connection, id: RecordId) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM attendance WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// The worker's most recent attendance event, ordered by its effective
/// instant (exit if marked, entry otherwise).
pub fn latest_for_worker(conn: &Connection, worker: WorkerId) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE worker_id = ?1
         ORDER BY date DESC, COALESCE(exit_time, entry_time) DESC, id DESC
         LIMIT 1",
    )?;
    Ok(stmt.query_row([worker], map_row).optional()?)
}

/// Most recently opened record still waiting for its exit.
pub fn open_for_worker(conn: &Connection, worker: WorkerId) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE worker_id = ?1 AND exit_time IS NULL
         ORDER BY date DESC, entry_time DESC, id DESC
         LIMIT 1",
    )?;
    Ok(stmt.query_row([worker], map_row).optional()?)
}

pub fn open_for_worker_on(
    conn: &Connection,
    worker: WorkerId,
    date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE worker_id = ?1 AND date = ?2 AND exit_time IS NULL
         ORDER BY entry_time DESC, id DESC
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![worker, date_str(date)], map_row)
        .optional()?)
}

pub fn list_for_site(conn: &Connection, site: SiteId) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance WHERE site_id = ?1 ORDER BY date ASC, entry_time ASC",
    )?;
    collect(&mut stmt, [site])
}

/// Records of a site for one day, latest entry first.
pub fn list_for_site_on(
    conn: &Connection,
    site: SiteId,
    date: &NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance WHERE site_id = ?1 AND date = ?2 ORDER BY entry_time DESC",
    )?;
    collect(&mut stmt, params![site, date_str(date)])
}
