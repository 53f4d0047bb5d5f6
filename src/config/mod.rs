use crate::errors::{AppError, AppResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Worked hours at or above which the flat daily rate is paid.
    #[serde(default = "default_full_day_hours")]
    pub full_day_hours: Decimal,
    #[serde(default = "default_max_travel_speed")]
    pub max_travel_speed_kmh: f64,
    /// Check-ins closer in time than this are never compared for travel speed.
    #[serde(default = "default_min_travel_window")]
    pub min_travel_window_hours: f64,
    #[serde(default = "default_profit_margin")]
    pub profit_margin: Decimal,
    #[serde(default = "default_radius")]
    pub default_radius_m: f64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_full_day_hours() -> Decimal {
    dec!(8)
}
fn default_max_travel_speed() -> f64 {
    800.0
}
fn default_min_travel_window() -> f64 {
    0.1
}
fn default_profit_margin() -> Decimal {
    dec!(0.10)
}
fn default_radius() -> f64 {
    50.0
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            full_day_hours: default_full_day_hours(),
            max_travel_speed_kmh: default_max_travel_speed(),
            min_travel_window_hours: default_min_travel_window(),
            profit_margin: default_profit_margin(),
            default_radius_m: default_radius(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        let base = if cfg!(target_os = "windows") {
            dirs::config_dir()
        } else {
            dirs::home_dir()
        };
        let base = base.unwrap_or_else(|| PathBuf::from("."));

        if cfg!(target_os = "windows") {
            base.join("sitelogger")
        } else {
            base.join(".sitelogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sitelogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sitelogger.sqlite")
    }

    /// Expand a leading `~/` to the home directory.
    pub fn resolve_path(path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if self.full_day_hours <= Decimal::ZERO {
            return Err(AppError::Config(
                "full_day_hours must be greater than zero".into(),
            ));
        }
        if !(self.max_travel_speed_kmh > 0.0) || !(self.min_travel_window_hours >= 0.0) {
            return Err(AppError::Config(
                "travel thresholds must be positive numbers".into(),
            ));
        }
        if self.profit_margin < Decimal::ZERO || self.profit_margin > Decimal::ONE {
            return Err(AppError::Config(
                "profit_margin must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
