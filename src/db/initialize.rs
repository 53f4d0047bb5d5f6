use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring the schema up to date. Safe to call on every open.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = pending.len(), "applying schema migrations");
    run_pending_migrations(conn)
}
