use crate::errors::{AppResult, DataAnomaly};
use crate::db::db_utils::datetime_str;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table, dated `at`.
pub fn write_log(
    conn: &Connection,
    at: NaiveDateTime,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    let now = datetime_str(&at);

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Persist anomalies for later audit and surface them as warnings.
pub fn log_anomalies(
    conn: &Connection,
    at: NaiveDateTime,
    anomalies: &[DataAnomaly],
) -> AppResult<()> {
    for anomaly in anomalies {
        tracing::warn!(code = anomaly.code(), "{}", anomaly);
        write_log(conn, at, "anomaly", anomaly.code(), &anomaly.to_string())?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
