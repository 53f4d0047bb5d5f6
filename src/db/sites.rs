use crate::db::db_utils::{date_str, get_bool, get_date, get_decimal};
use crate::errors::AppResult;
use crate::models::coords::Coordinates;
use crate::models::site::{NewSite, Site};
use crate::models::{SiteId, WorkerId};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<Site> {
    Ok(Site {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        center: Coordinates::new(row.get("lat")?, row.get("lon")?),
        radius_m: row.get("radius_m")?,
        total_budget: get_decimal(row, "total_budget")?,
        penalty_per_day: get_decimal(row, "penalty_per_day")?,
        start_date: get_date(row, "start_date")?,
        estimated_end_date: get_date(row, "estimated_end_date")?,
        supervisor_id: row.get("supervisor_id")?,
        active: get_bool(row, "active")?,
    })
}

pub fn insert_site(conn: &Connection, s: &NewSite) -> AppResult<SiteId> {
    conn.execute(
        "INSERT INTO sites (name, address, lat, lon, radius_m, total_budget, penalty_per_day,
                            start_date, estimated_end_date, supervisor_id, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1)",
        params![
            s.name,
            s.address,
            s.center.lat,
            s.center.lon,
            s.radius_m,
            s.total_budget.to_string(),
            s.penalty_per_day.to_string(),
            date_str(&s.start_date),
            date_str(&s.estimated_end_date),
            s.supervisor_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_site(conn: &Connection, id: SiteId) -> AppResult<Option<Site>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM sites WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn list_sites(conn: &Connection, only_active: bool) -> AppResult<Vec<Site>> {
    let sql = if only_active {
        "SELECT * FROM sites WHERE active = 1 ORDER BY id ASC"
    } else {
        "SELECT * FROM sites ORDER BY id ASC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_sites_for_supervisor(conn: &Connection, supervisor: WorkerId) -> AppResult<Vec<Site>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sites WHERE supervisor_id = ?1 AND active = 1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([supervisor], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns the number of rows touched (0 when the site does not exist).
pub fn set_active(conn: &Connection, id: SiteId, active: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE sites SET active = ?1 WHERE id = ?2",
        params![active as i64, id],
    )?)
}
