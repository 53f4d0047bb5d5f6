use crate::config::Config;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Business thresholds applied by the calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Worked hours at or above which the flat daily rate is paid.
    pub full_day_hours: Decimal,
    pub max_travel_speed_kmh: f64,
    /// Elapsed time below which no travel speed is computed.
    pub min_travel_window_hours: f64,
    /// Share of the budget that must remain for a site to count as profitable.
    pub profit_margin: Decimal,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            full_day_hours: dec!(8),
            max_travel_speed_kmh: 800.0,
            min_travel_window_hours: 0.1,
            profit_margin: dec!(0.10),
        }
    }
}

impl From<&Config> for Policy {
    fn from(cfg: &Config) -> Self {
        Self {
            full_day_hours: cfg.full_day_hours,
            max_travel_speed_kmh: cfg.max_travel_speed_kmh,
            min_travel_window_hours: cfg.min_travel_window_hours,
            profit_margin: cfg.profit_margin,
        }
    }
}
