use crate::db::db_utils::{
    date_str, datetime_str, get_bool, get_date, get_decimal, get_time, time_str,
};
use crate::errors::AppResult;
use crate::models::incident::IncidentReport;
use crate::models::{IncidentId, SiteId, WorkerId};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Maps the incident row; `affected` is filled by the caller.
fn map_row(row: &Row) -> rusqlite::Result<IncidentReport> {
    Ok(IncidentReport {
        id: row.get("id")?,
        site_id: row.get("site_id")?,
        supervisor_id: row.get("supervisor_id")?,
        date: get_date(row, "date")?,
        start_time: get_time(row, "start_time")?,
        end_time: get_time(row, "end_time")?,
        reason: row.get("reason")?,
        affected: Vec::new(),
        delay_days: get_decimal(row, "delay_days")?,
        lost_hours: get_decimal(row, "lost_hours")?,
        lost_cost: get_decimal(row, "lost_cost")?,
        read: get_bool(row, "read")?,
    })
}

fn with_affected(conn: &Connection, mut inc: IncidentReport) -> AppResult<IncidentReport> {
    inc.affected = load_affected(conn, inc.id)?;
    Ok(inc)
}

pub fn insert_incident(
    conn: &Connection,
    inc: &IncidentReport,
    created_at: NaiveDateTime,
) -> AppResult<IncidentId> {
    conn.execute(
        "INSERT INTO incidents (site_id, supervisor_id, date, start_time, end_time, reason,
                                delay_days, lost_hours, lost_cost, read, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10)",
        params![
            inc.site_id,
            inc.supervisor_id,
            date_str(&inc.date),
            time_str(&inc.start_time),
            time_str(&inc.end_time),
            inc.reason,
            inc.delay_days.to_string(),
            inc.lost_hours.to_string(),
            inc.lost_cost.to_string(),
            datetime_str(&created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_impact(conn: &Connection, inc: &IncidentReport) -> AppResult<()> {
    conn.execute(
        "UPDATE incidents SET lost_hours = ?1, lost_cost = ?2 WHERE id = ?3",
        params![inc.lost_hours.to_string(), inc.lost_cost.to_string(), inc.id],
    )?;
    Ok(())
}

pub fn load_incident(conn: &Connection, id: IncidentId) -> AppResult<Option<IncidentReport>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM incidents WHERE id = ?1")?;
    match stmt.query_row([id], map_row).optional()? {
        Some(inc) => Ok(Some(with_affected(conn, inc)?)),
        None => Ok(None),
    }
}

pub fn list_for_site(conn: &Connection, site: SiteId) -> AppResult<Vec<IncidentReport>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM incidents WHERE site_id = ?1 ORDER BY date ASC, start_time ASC",
    )?;
    let rows = stmt.query_map([site], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(with_affected(conn, r?)?);
    }
    Ok(out)
}

/// All incidents, newest first, optionally restricted to a site or to
/// reports nobody acknowledged yet.
pub fn list_incidents(
    conn: &Connection,
    site: Option<SiteId>,
    unread_only: bool,
) -> AppResult<Vec<IncidentReport>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM incidents
         WHERE (?1 IS NULL OR site_id = ?1)
           AND (?2 = 0 OR read = 0)
         ORDER BY date DESC, start_time DESC",
    )?;
    let rows = stmt.query_map(params![site, unread_only as i64], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(with_affected(conn, r?)?);
    }
    Ok(out)
}

pub fn load_affected(conn: &Connection, id: IncidentId) -> AppResult<Vec<WorkerId>> {
    let mut stmt = conn.prepare_cached(
        "SELECT worker_id FROM incident_workers WHERE incident_id = ?1 ORDER BY worker_id ASC",
    )?;
    let rows = stmt.query_map([id], |row| row.get::<_, WorkerId>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Replace the whole affected set of an incident.
pub fn replace_affected(conn: &Connection, id: IncidentId, workers: &[WorkerId]) -> AppResult<()> {
    conn.execute("DELETE FROM incident_workers WHERE incident_id = ?1", [id])?;

    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO incident_workers (incident_id, worker_id) VALUES (?1, ?2)",
    )?;
    for w in workers {
        stmt.execute(params![id, w])?;
    }
    Ok(())
}

pub fn mark_read(conn: &Connection, id: IncidentId) -> AppResult<usize> {
    Ok(conn.execute("UPDATE incidents SET read = 1 WHERE id = ?1", [id])?)
}
