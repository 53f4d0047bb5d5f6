use crate::cli::parser::Cli;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom = cli
        .db
        .as_deref()
        .map(|p| Config::resolve_path(p).to_string_lossy().to_string());
    let db_path = Config::init_all(custom, cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing sitelogger…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", &db_path);

    // the internal log is not critical for init
    if let Err(e) = write_log(
        &pool.conn,
        SystemClock.now(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 sitelogger initialization completed!");
    Ok(())
}
