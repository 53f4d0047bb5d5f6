pub mod balance;
pub mod checkin;
pub mod config;
pub mod correct;
pub mod dashboard;
pub mod db;
pub mod incident;
pub mod init;
pub mod log;
pub mod site;
pub mod worker;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppResult, Audited};
use crate::ui::messages::warning;
use chrono::NaiveDateTime;

/// Open the configured database, bringing its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Wall clock, or a clock pinned to `at` when the user supplied one.
pub(crate) fn clock_for(at: Option<NaiveDateTime>) -> Box<dyn Clock> {
    match at {
        Some(t) => Box::new(FixedClock(t)),
        None => Box::new(SystemClock),
    }
}

pub(crate) fn report_anomalies<T>(out: &Audited<T>) {
    if !out.has_anomalies() {
        return;
    }
    for a in &out.anomalies {
        warning(a);
    }
}
