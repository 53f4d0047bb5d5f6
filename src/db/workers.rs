use crate::db::db_utils::{datetime_str, get_decimal};
use crate::errors::{AppError, AppResult};
use crate::models::WorkerId;
use crate::models::role::Role;
use crate::models::worker::{NewWorker, Worker};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<Worker> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        national_id: row.get("national_id")?,
        phone: row.get("phone")?,
        role,
        daily_rate: get_decimal(row, "daily_rate")?,
        hourly_rate: get_decimal(row, "hourly_rate")?,
        device_id: row.get("device_id")?,
    })
}

pub fn insert_worker(
    conn: &Connection,
    w: &NewWorker,
    created_at: NaiveDateTime,
) -> AppResult<WorkerId> {
    conn.execute(
        "INSERT INTO workers (name, national_id, phone, role, daily_rate, hourly_rate, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            w.name,
            w.national_id,
            w.phone,
            w.role.to_db_str(),
            w.daily_rate.to_string(),
            w.hourly_rate.to_string(),
            datetime_str(&created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_worker(conn: &Connection, id: WorkerId) -> AppResult<Option<Worker>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM workers WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn load_workers(conn: &Connection, ids: &[WorkerId]) -> AppResult<Vec<Worker>> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let w = load_worker(conn, *id)?
            .ok_or_else(|| AppError::NotFound(format!("worker {}", id)))?;
        out.push(w);
    }
    Ok(out)
}

pub fn list_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare("SELECT * FROM workers ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
