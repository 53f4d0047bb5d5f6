#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sitelogger::clock::FixedClock;
use sitelogger::core::Context;
use sitelogger::core::policy::Policy;
use sitelogger::core::registry::RegistryLogic;
use sitelogger::db::initialize::init_db;
use sitelogger::db::pool::DbPool;
use sitelogger::models::attendance::CheckIn;
use sitelogger::models::coords::Coordinates;
use sitelogger::models::role::Role;
use sitelogger::models::site::{NewSite, Site};
use sitelogger::models::worker::{NewWorker, Worker};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Colosseum, Rome.
pub const ROME: Coordinates = Coordinates {
    lat: 41.8902,
    lon: 12.4922,
};

/// Duomo, Milan.
pub const MILAN: Coordinates = Coordinates {
    lat: 45.4642,
    lon: 9.1900,
};

pub fn slg() -> Command {
    cargo_bin_cmd!("sitelogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sitelogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `--test init` on a fresh database
pub fn init_test_db(db_path: &str) {
    slg()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("datetime")
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

/// Migrated in-memory database
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Registered at a fixed instant before any test scenario starts.
pub fn add_worker(pool: &mut DbPool, name: &str, role: Role, daily: Decimal, hourly: Decimal) -> Worker {
    let clock = FixedClock(at("2025-06-01 07:00"));
    let ctx = Context::new(&clock, Policy::default());
    RegistryLogic::register_worker(
        pool,
        &ctx,
        NewWorker {
            name: name.to_string(),
            national_id: None,
            phone: None,
            role,
            daily_rate: daily,
            hourly_rate: hourly,
        },
    )
    .expect("register worker")
}

pub fn new_site(name: &str, center: Coordinates, budget: Decimal, penalty: Decimal) -> NewSite {
    NewSite {
        name: name.to_string(),
        address: String::new(),
        center,
        radius_m: 50.0,
        total_budget: budget,
        penalty_per_day: penalty,
        start_date: day("2025-06-01"),
        estimated_end_date: day("2025-12-31"),
        supervisor_id: None,
    }
}

pub fn add_site(pool: &mut DbPool, ctx: &Context, site: NewSite) -> Site {
    RegistryLogic::register_site(pool, ctx, site).expect("register site")
}

/// A site value that never touches the database
pub fn site_value(budget: Decimal, penalty: Decimal) -> Site {
    Site {
        id: 1,
        name: "Tower A".into(),
        address: String::new(),
        center: ROME,
        radius_m: 50.0,
        total_budget: budget,
        penalty_per_day: penalty,
        start_date: day("2025-06-01"),
        estimated_end_date: day("2025-12-31"),
        supervisor_id: None,
        active: true,
    }
}

pub fn check_in(when: &str, coords: Coordinates) -> CheckIn {
    CheckIn {
        timestamp: at(when),
        coords: Some(coords),
        photo: None,
        client_ip: None,
    }
}
