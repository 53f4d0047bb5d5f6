//! sitelogger library root.
//! Exposes the CLI parser, the high-level run() function and the attendance,
//! incident and balance logic behind it.

pub mod cli;
pub mod clock;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod telemetry;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Worker { .. } => cli::commands::worker::handle(&cli.command, cfg),
        Commands::Site { .. } => cli::commands::site::handle(&cli.command, cfg),
        Commands::Entry { .. } | Commands::Exit { .. } | Commands::Mark { .. } => {
            cli::commands::checkin::handle(&cli.command, cfg)
        }
        Commands::Correct { .. } => cli::commands::correct::handle(&cli.command, cfg),
        Commands::Incident { .. } => cli::commands::incident::handle(&cli.command, cfg),
        Commands::Balance { .. } => cli::commands::balance::handle(&cli.command, cfg),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // a test run never reads the user's configuration file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // diagnostics are optional; a second init (tests) is not an error
    if let Err(e) = telemetry::init(&cfg) {
        eprintln!("⚠️ {}", e);
    }
    tracing::debug!(database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg)
}
