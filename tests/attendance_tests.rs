use rust_decimal_macros::dec;
use sitelogger::clock::FixedClock;
use sitelogger::core::Context;
use sitelogger::core::attendance::{AttendanceLogic, Correction, Marked};
use sitelogger::core::calculator::attendance::{wage_for, within_geofence};
use sitelogger::core::calculator::geo::distance_between;
use sitelogger::core::policy::Policy;
use sitelogger::core::registry::RegistryLogic;
use sitelogger::db::attendance::load_record;
use sitelogger::db::log::load_log;
use sitelogger::errors::{AppError, DataAnomaly};
use sitelogger::models::coords::Coordinates;
use sitelogger::models::role::Role;
use sitelogger::utils::formatting::parse_amount;

mod common;
use common::{MILAN, ROME, add_site, add_worker, at, check_in, memory_pool, new_site, site_value};

#[test]
fn test_full_day_pays_flat_daily_rate() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 16:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let entry = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");
    assert!(entry.value.entry_valid);
    assert!(entry.value.is_open());
    assert_eq!(entry.value.wage, None);

    let exit = AttendanceLogic::record_exit(
        &mut pool,
        &ctx,
        Some(entry.value.id),
        check_in("2025-06-02 16:00", ROME),
    )
    .expect("exit");

    // 8h at 2,000/h would be 16,000: the flat rate wins
    assert_eq!(exit.value.worked_hours, dec!(8));
    assert_eq!(exit.value.wage, Some(dec!(20000)));
    assert!(!exit.has_anomalies());
}

#[test]
fn test_wage_cliff_just_below_full_day_is_proportional() {
    let w = sitelogger::models::worker::Worker {
        id: 1,
        name: "Ana".into(),
        national_id: None,
        phone: None,
        role: Role::Worker,
        daily_rate: dec!(20000),
        hourly_rate: dec!(2000),
        device_id: None,
    };
    let policy = Policy::default();

    assert_eq!(wage_for(dec!(7.999), &w, &policy).unwrap(), dec!(15998.00));
    assert_eq!(wage_for(dec!(8.000), &w, &policy).unwrap(), dec!(20000));

    // flat rate even when proportional pay would be higher
    assert_eq!(wage_for(dec!(12), &w, &policy).unwrap(), dec!(20000));
}

#[test]
fn test_seconds_short_of_full_day_stay_below_cliff() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 16:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let entry = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");

    let mut out = check_in("2025-06-02 15:59", ROME);
    out.timestamp = out.timestamp + chrono::Duration::seconds(56);
    let exit = AttendanceLogic::record_exit(&mut pool, &ctx, Some(entry.value.id), out).expect("exit");

    assert_eq!(exit.value.worked_hours, dec!(7.99));
    assert_eq!(exit.value.wage, Some(dec!(15980.00)));
}

#[test]
fn test_geofence_boundary_is_inside() {
    let mut site = site_value(dec!(1000), dec!(0));
    let p = Coordinates::new(ROME.lat + 0.0004, ROME.lon);
    site.radius_m = distance_between(&site.center, &p);

    assert!(within_geofence(&site, Some(p)));

    site.radius_m -= 0.01;
    assert!(!within_geofence(&site, Some(p)));
    assert!(!within_geofence(&site, None));
}

#[test]
fn test_entry_outside_geofence_is_recorded_invalid() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 08:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    // ~1.1 km north of the site
    let far = Coordinates::new(ROME.lat + 0.01, ROME.lon);
    let entry = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", far))
        .expect("entry");

    assert!(!entry.value.entry_valid);
    assert!(!entry.value.fraud_flagged);
    let stored = load_record(&pool.conn, entry.value.id).unwrap().expect("stored");
    assert!(!stored.entry_valid);
}

#[test]
fn test_entry_without_coordinates_is_rejected() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 08:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let mut ci = check_in("2025-06-02 08:00", ROME);
    ci.coords = None;
    let err = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, ci).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut ci = check_in("2025-06-02 08:00", ROME);
    ci.coords = Some(Coordinates::new(f64::NAN, 12.0));
    let err = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, ci).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_unknown_worker_or_inactive_site_is_rejected() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 08:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let err = AttendanceLogic::record_entry(&mut pool, &ctx, 999, s.id, check_in("2025-06-02 08:00", ROME))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    RegistryLogic::set_site_active(&mut pool, &ctx, s.id, false).expect("deactivate");
    let err = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_exit_without_open_record_is_not_found() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 16:00"));
    let ctx = Context::new(&clock, Policy::default());
    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));

    let err = AttendanceLogic::record_exit(&mut pool, &ctx, None, check_in("2025-06-02 16:00", ROME))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = AttendanceLogic::exit_open_record(&mut pool, &ctx, w.id, check_in("2025-06-02 16:00", ROME))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_exit_before_entry_clamps_to_zero_with_anomaly() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 08:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let entry = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");
    let exit = AttendanceLogic::record_exit(
        &mut pool,
        &ctx,
        Some(entry.value.id),
        check_in("2025-06-02 07:00", ROME),
    )
    .expect("clamped exit still completes");

    assert_eq!(exit.value.worked_hours, dec!(0));
    assert_eq!(exit.value.wage, Some(dec!(0)));
    assert!(matches!(
        exit.anomalies.as_slice(),
        [DataAnomaly::ExitBeforeEntry { .. }]
    ));
}

#[test]
fn test_second_entry_while_open_is_tolerated() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 09:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let first = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("first entry");
    let second = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 09:00", ROME))
        .expect("second entry");

    assert_ne!(first.value.id, second.value.id);
    assert_eq!(
        second.anomalies,
        vec![DataAnomaly::OverlappingOpenRecord {
            worker_id: w.id,
            record_id: first.value.id,
        }]
    );
    assert!(load_record(&pool.conn, first.value.id).unwrap().unwrap().is_open());
}

#[test]
fn test_impossible_travel_marks_entry_invalid() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 09:30"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let rome = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));
    let milan = add_site(&mut pool, &ctx, new_site("Depot B", MILAN, dec!(500000), dec!(0)));

    // first check-in ever: nothing to compare with
    let first = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, rome.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");
    assert!(!first.value.fraud_flagged);
    AttendanceLogic::record_exit(&mut pool, &ctx, Some(first.value.id), check_in("2025-06-02 09:00", ROME))
        .expect("exit");

    // ~480 km in half an hour
    let jump = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, milan.id, check_in("2025-06-02 09:30", MILAN))
        .expect("entry is stored even when flagged");
    assert!(jump.value.fraud_flagged);
    assert!(!jump.value.entry_valid);
}

#[test]
fn test_mark_toggles_entry_and_exit() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 17:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let first = AttendanceLogic::mark(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("mark in");
    let Marked::Entry(opened) = first else {
        panic!("expected an entry");
    };

    let second = AttendanceLogic::mark(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 12:00", ROME))
        .expect("mark out");
    let Marked::Exit(out) = second else {
        panic!("expected an exit");
    };
    assert_eq!(out.value.id, opened.value.id);
    assert_eq!(out.value.worked_hours, dec!(4));
    assert_eq!(out.value.wage, Some(dec!(8000.00)));
}

#[test]
fn test_correction_requires_supervisor_and_recomputes_wage() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-03 10:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let boss = add_worker(&mut pool, "Marta", Role::Supervisor, dec!(30000), dec!(3000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let entry = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");
    let id = entry.value.id;
    let fix = Correction {
        entry_time: None,
        exit_time: chrono::NaiveTime::from_hms_opt(11, 30, 0),
    };

    let err = AttendanceLogic::correct(&mut pool, &ctx, id, fix.clone(), w.id).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let fixed = AttendanceLogic::correct(&mut pool, &ctx, id, fix, boss.id).expect("correction");
    assert_eq!(fixed.value.worked_hours, dec!(3.5));
    assert_eq!(fixed.value.wage, Some(dec!(7000.00)));
    assert_eq!(fixed.value.modified_by, Some(boss.id));
    assert_eq!(fixed.value.modified_at, Some(at("2025-06-03 10:00")));

    let err = AttendanceLogic::correct(&mut pool, &ctx, 999, Correction::default(), boss.id).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_wage_out_of_range_fails_and_keeps_record_open() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 12:00"));
    let ctx = Context::new(&clock, Policy::default());

    let hourly = parse_amount("70000000000000000000000000000").expect("fits in a Decimal");
    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), hourly);
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let entry = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");
    let err = AttendanceLogic::record_exit(&mut pool, &ctx, Some(entry.value.id), check_in("2025-06-02 12:00", ROME))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    let stored = load_record(&pool.conn, entry.value.id).unwrap().expect("record");
    assert!(stored.is_open());
    assert_eq!(stored.wage, None);
}

#[test]
fn test_log_and_created_at_use_the_injected_clock() {
    let mut pool = memory_pool();
    let clock = FixedClock(at("2025-06-02 08:00"));
    let ctx = Context::new(&clock, Policy::default());

    let w = add_worker(&mut pool, "Ana", Role::Worker, dec!(20000), dec!(2000));
    let s = add_site(&mut pool, &ctx, new_site("Tower A", ROME, dec!(1000000), dec!(0)));

    let first = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("entry");
    let second = AttendanceLogic::record_entry(&mut pool, &ctx, w.id, s.id, check_in("2025-06-02 08:00", ROME))
        .expect("overlapping entry");
    assert!(second.has_anomalies());

    let log = load_log(&pool.conn).unwrap();
    let dated: Vec<_> = log
        .iter()
        .filter(|e| matches!(e.operation.as_str(), "site_add" | "entry" | "anomaly"))
        .collect();
    assert_eq!(dated.len(), 4);
    assert!(dated.iter().all(|e| e.date == "2025-06-02 08:00:00"));

    // workers registered by the helper carry its own fixed instant
    let worker_log = log.iter().find(|e| e.operation == "worker_add").expect("worker log");
    assert_eq!(worker_log.date, "2025-06-01 07:00:00");

    let created: String = pool
        .conn
        .query_row(
            "SELECT created_at FROM attendance WHERE id = ?1",
            [first.value.id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(created, "2025-06-02 08:00:00");
}
