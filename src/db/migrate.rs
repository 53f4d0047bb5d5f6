use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. Migration bookkeeping lives in it.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_initial_schema",
        description: "Created workers, sites, attendance, incidents and balances tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS workers (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            national_id  TEXT UNIQUE,
            phone        TEXT,
            role         TEXT NOT NULL DEFAULT 'worker'
                         CHECK(role IN ('admin','supervisor','worker')),
            daily_rate   TEXT NOT NULL DEFAULT '0',
            hourly_rate  TEXT NOT NULL DEFAULT '0',
            device_id    TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sites (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT NOT NULL,
            address             TEXT NOT NULL DEFAULT '',
            lat                 REAL NOT NULL,
            lon                 REAL NOT NULL,
            radius_m            REAL NOT NULL DEFAULT 50,
            total_budget        TEXT NOT NULL,
            penalty_per_day     TEXT NOT NULL DEFAULT '0',
            start_date          TEXT NOT NULL,
            estimated_end_date  TEXT NOT NULL,
            supervisor_id       INTEGER REFERENCES workers(id) ON DELETE SET NULL,
            active              INTEGER NOT NULL DEFAULT 1,
            CHECK(estimated_end_date >= start_date)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id     INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            site_id       INTEGER NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
            date          TEXT NOT NULL,
            entry_time    TEXT NOT NULL,
            entry_lat     REAL NOT NULL,
            entry_lon     REAL NOT NULL,
            entry_photo   TEXT,
            client_ip     TEXT,
            exit_time     TEXT,
            exit_lat      REAL,
            exit_lon      REAL,
            exit_photo    TEXT,
            worked_hours  TEXT NOT NULL DEFAULT '0',
            wage          TEXT,
            entry_valid   INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_worker ON attendance(worker_id, date, entry_time);
        CREATE INDEX IF NOT EXISTS idx_attendance_site_date ON attendance(site_id, date);

        CREATE TABLE IF NOT EXISTS incidents (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id        INTEGER NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
            supervisor_id  INTEGER REFERENCES workers(id) ON DELETE SET NULL,
            date           TEXT NOT NULL,
            start_time     TEXT NOT NULL,
            end_time       TEXT NOT NULL,
            reason         TEXT NOT NULL,
            delay_days     TEXT NOT NULL DEFAULT '0',
            lost_hours     TEXT NOT NULL DEFAULT '0',
            lost_cost      TEXT NOT NULL DEFAULT '0',
            read           INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_incidents_site ON incidents(site_id, date);

        CREATE TABLE IF NOT EXISTS incident_workers (
            incident_id  INTEGER NOT NULL REFERENCES incidents(id) ON DELETE CASCADE,
            worker_id    INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            PRIMARY KEY (incident_id, worker_id)
        );

        CREATE TABLE IF NOT EXISTS site_balances (
            site_id           INTEGER PRIMARY KEY REFERENCES sites(id) ON DELETE CASCADE,
            total_wages       TEXT NOT NULL DEFAULT '0',
            total_loss_cost   TEXT NOT NULL DEFAULT '0',
            total_penalty     TEXT NOT NULL DEFAULT '0',
            remaining_budget  TEXT NOT NULL DEFAULT '0',
            profitable        INTEGER NOT NULL DEFAULT 1,
            updated_at        TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250412_0002_attendance_fraud_flag",
        description: "Added fraud_flagged to attendance",
        sql: "ALTER TABLE attendance ADD COLUMN fraud_flagged INTEGER NOT NULL DEFAULT 0;",
    },
    Migration {
        version: "20250520_0003_attendance_audit",
        description: "Added modified_by / modified_at to attendance",
        sql: r#"
        ALTER TABLE attendance ADD COLUMN modified_by INTEGER REFERENCES workers(id) ON DELETE SET NULL;
        ALTER TABLE attendance ADD COLUMN modified_at TEXT;
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let script = format!(
        "BEGIN;\n{}\nINSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', '{}', '{}');\nCOMMIT;",
        m.sql, m.version, m.description
    );

    if let Err(e) = conn.execute_batch(&script) {
        // leave the connection usable for the caller
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(AppError::Migration(format!("{}: {}", m.version, e)));
    }

    tracing::info!(version = m.version, "migration applied");
    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded in the log table, in order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
