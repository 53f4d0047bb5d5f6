//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::{NaiveDateTime, NaiveTime};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Logically inconsistent but parseable input.
///
/// These never abort an operation: the offending duration is clamped to zero,
/// the operation completes and the anomaly travels back to the caller inside
/// [`Audited`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataAnomaly {
    #[error("exit at {exit} precedes entry at {entry}; worked hours clamped to 0")]
    ExitBeforeEntry {
        entry: NaiveDateTime,
        exit: NaiveDateTime,
    },

    #[error("incident ends at {end} before it starts at {start}; lost hours clamped to 0")]
    IncidentEndBeforeStart { start: NaiveTime, end: NaiveTime },

    #[error("worker {worker_id} already has open attendance record {record_id}; a new period was started")]
    OverlappingOpenRecord { worker_id: i64, record_id: i64 },
}

impl DataAnomaly {
    /// Short code used as the `target` column of the internal log.
    pub fn code(&self) -> &'static str {
        match self {
            DataAnomaly::ExitBeforeEntry { .. } => "exit_before_entry",
            DataAnomaly::IncidentEndBeforeStart { .. } => "incident_end_before_start",
            DataAnomaly::OverlappingOpenRecord { .. } => "overlapping_open_record",
        }
    }
}

/// Result value paired with the warnings raised while producing it.
#[derive(Debug, Clone)]
pub struct Audited<T> {
    pub value: T,
    pub anomalies: Vec<DataAnomaly>,
}

impl<T> Audited<T> {
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}
