use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_test_db, setup_test_db, slg};

/// Worker 1 (Ana, worker), worker 2 (Marta, supervisor), site 1 in Rome.
fn seed(db_path: &str) {
    init_test_db(db_path);

    slg()
        .args([
            "--db", db_path, "--test", "worker", "add", "Ana", "--daily", "20000", "--hourly",
            "2000",
        ])
        .assert()
        .success()
        .stdout(contains("Worker 1 registered"));

    slg()
        .args([
            "--db",
            db_path,
            "--test",
            "worker",
            "add",
            "Marta",
            "--role",
            "supervisor",
            "--daily",
            "30000",
            "--hourly",
            "3000",
        ])
        .assert()
        .success()
        .stdout(contains("Worker 2 registered"));

    slg()
        .args([
            "--db",
            db_path,
            "--test",
            "site",
            "add",
            "Tower A",
            "--lat",
            "41.8902",
            "--lon",
            "12.4922",
            "--budget",
            "1000000",
            "--penalty",
            "10000",
            "--start",
            "2025-06-01",
            "--end",
            "2025-12-31",
            "--supervisor",
            "2",
        ])
        .assert()
        .success()
        .stdout(contains("Site 1 registered"));
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());

    slg()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("up to date"));
}

#[test]
fn test_worker_and_site_listing() {
    let db_path = setup_test_db("cli_listing");
    seed(&db_path);

    slg()
        .args(["--db", &db_path, "--test", "worker", "list"])
        .assert()
        .success()
        .stdout(contains("Ana").and(contains("supervisor")).and(contains("20,000.00")));

    slg()
        .args(["--db", &db_path, "--test", "site", "list", "--supervisor", "2"])
        .assert()
        .success()
        .stdout(contains("Tower A").and(contains("1,000,000.00")));
}

#[test]
fn test_full_day_entry_and_exit() {
    let db_path = setup_test_db("cli_full_day");
    seed(&db_path);

    slg()
        .args([
            "--db",
            &db_path,
            "--test",
            "entry",
            "--worker",
            "1",
            "--site",
            "1",
            "--lat",
            "41.8902",
            "--lon",
            "12.4922",
            "--at",
            "2025-06-02 08:00",
        ])
        .assert()
        .success()
        .stdout(contains("Entry recorded: record 1"));

    slg()
        .args([
            "--db",
            &db_path,
            "--test",
            "exit",
            "--worker",
            "1",
            "--lat",
            "41.8902",
            "--lon",
            "12.4922",
            "--at",
            "2025-06-02 16:00",
        ])
        .assert()
        .success()
        .stdout(contains("worked 8.00h").and(contains("wage 20,000.00")));

    slg()
        .args(["--db", &db_path, "--test", "balance", "1"])
        .assert()
        .success()
        .stdout(contains("980,000.00").and(contains("PROFITABLE")).and(contains("Total spend")));

    slg()
        .args(["--db", &db_path, "--test", "dashboard", "1", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("Present: 1").and(contains("Ana")));
}

#[test]
fn test_entry_outside_geofence_is_flagged() {
    let db_path = setup_test_db("cli_geofence");
    seed(&db_path);

    slg()
        .args([
            "--db",
            &db_path,
            "--test",
            "mark",
            "--worker",
            "1",
            "--site",
            "1",
            "--lat",
            "41.9100",
            "--lon",
            "12.4922",
            "--at",
            "2025-06-02 08:00",
        ])
        .assert()
        .success()
        .stdout(contains("outside geofence"));
}

#[test]
fn test_entry_with_non_numeric_coordinates_fails() {
    let db_path = setup_test_db("cli_bad_coords");
    seed(&db_path);

    slg()
        .args([
            "--db", &db_path, "--test", "entry", "--worker", "1", "--site", "1", "--lat", "north",
            "--lon", "12.4922",
        ])
        .assert()
        .failure()
        .stderr(contains("GPS coordinates are required"));
}

#[test]
fn test_exit_without_open_record_fails() {
    let db_path = setup_test_db("cli_no_open");
    seed(&db_path);

    slg()
        .args([
            "--db", &db_path, "--test", "exit", "--worker", "1", "--lat", "41.8902", "--lon",
            "12.4922",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_incident_lifecycle() {
    let db_path = setup_test_db("cli_incident");
    seed(&db_path);

    slg()
        .args([
            "--db",
            &db_path,
            "--test",
            "incident",
            "add",
            "--site",
            "1",
            "--by",
            "2",
            "--date",
            "2025-06-02",
            "--start",
            "09:00",
            "--end",
            "11:00",
            "--reason",
            "crane failure",
            "--workers",
            "1,2",
            "--delay",
            "0.5",
        ])
        .assert()
        .success()
        .stdout(contains("2 worker(s)").and(contains("cost 10,000.00")));

    slg()
        .args(["--db", &db_path, "--test", "balance", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_loss_cost\": \"10000").and(contains("\"total_penalty\": \"5000")));

    slg()
        .args(["--db", &db_path, "--test", "incident", "workers", "1", "--clear"])
        .assert()
        .success()
        .stdout(contains("0 worker(s)").and(contains("cost 0.00")));

    slg()
        .args(["--db", &db_path, "--test", "incident", "read", "1"])
        .assert()
        .success()
        .stdout(contains("1 incident report(s) marked as read"));

    slg()
        .args(["--db", &db_path, "--test", "incident", "list", "--unread"])
        .assert()
        .success()
        .stdout(contains("No incident reports"));
}

#[test]
fn test_second_entry_warns_and_logs_at_given_time() {
    let db_path = setup_test_db("cli_overlap");
    seed(&db_path);

    let entry = |at: &str| {
        slg()
            .args([
                "--db", &db_path, "--test", "entry", "--worker", "1", "--site", "1", "--lat",
                "41.8902", "--lon", "12.4922", "--at", at,
            ])
            .assert()
            .success()
    };
    entry("2025-06-02 08:00").stdout(contains("Entry recorded: record 1"));
    entry("2025-06-02 08:30").stdout(contains("already has open attendance record 1"));

    slg()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("2025-06-02 08:30:00").and(contains("overlapping_open_record")));
}

#[test]
fn test_incident_workers_add_and_remove_together() {
    let db_path = setup_test_db("cli_incident_workers");
    seed(&db_path);

    slg()
        .args([
            "--db", &db_path, "--test", "incident", "add", "--site", "1", "--by", "2", "--date",
            "2025-06-02", "--start", "09:00", "--end", "11:00", "--reason", "crane failure",
            "--workers", "1",
        ])
        .assert()
        .success()
        .stdout(contains("1 worker(s)").and(contains("cost 4,000.00")));

    slg()
        .args([
            "--db", &db_path, "--test", "incident", "workers", "1", "--add", "2", "--remove", "1",
        ])
        .assert()
        .success()
        .stdout(contains("1 worker(s)").and(contains("cost 6,000.00")));

    // unknown worker: nothing changes
    slg()
        .args([
            "--db", &db_path, "--test", "incident", "workers", "1", "--add", "99", "--remove", "2",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    slg()
        .args(["--db", &db_path, "--test", "balance", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_loss_cost\": \"6000"));
}

#[test]
fn test_huge_penalty_fails_cleanly() {
    let db_path = setup_test_db("cli_huge_penalty");
    seed(&db_path);

    slg()
        .args([
            "--db",
            &db_path,
            "--test",
            "site",
            "add",
            "Tower B",
            "--lat",
            "41.8902",
            "--lon",
            "12.4922",
            "--budget",
            "1000000",
            "--penalty",
            "70000000000000000000000000000",
            "--start",
            "2025-06-01",
            "--end",
            "2025-12-31",
        ])
        .assert()
        .success()
        .stdout(contains("Site 2 registered"));

    slg()
        .args([
            "--db", &db_path, "--test", "incident", "add", "--site", "2", "--by", "2", "--start",
            "09:00", "--end", "10:00", "--reason", "flooding", "--delay", "2",
        ])
        .assert()
        .code(1)
        .stderr(contains("Invalid amount"));

    slg()
        .args(["--db", &db_path, "--test", "incident", "list", "--site", "2"])
        .assert()
        .success()
        .stdout(contains("No incident reports"));
}

#[test]
fn test_correction_by_supervisor() {
    let db_path = setup_test_db("cli_correct");
    seed(&db_path);

    slg()
        .args([
            "--db",
            &db_path,
            "--test",
            "entry",
            "--worker",
            "1",
            "--site",
            "1",
            "--lat",
            "41.8902",
            "--lon",
            "12.4922",
            "--at",
            "2025-06-02 08:00",
        ])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "--test", "correct", "1", "--exit", "12:00", "--by", "1"])
        .assert()
        .failure()
        .stderr(contains("not allowed"));

    slg()
        .args(["--db", &db_path, "--test", "correct", "1", "--exit", "12:00", "--by", "2"])
        .assert()
        .success()
        .stdout(contains("worked 4.00h").and(contains("wage 8,000.00")));

    slg()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("correct").and(contains("migration_applied")));
}
