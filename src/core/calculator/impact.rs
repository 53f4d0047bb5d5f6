use super::money;
use crate::errors::{AppResult, DataAnomaly};
use chrono::NaiveTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Impact {
    pub lost_hours: Decimal,
    pub lost_cost: Decimal,
    pub anomaly: Option<DataAnomaly>,
}

/// Lost productivity for an incident window, charged at each affected
/// worker's hourly rate. An inverted window counts as zero hours.
pub fn compute_impact(
    start: NaiveTime,
    end: NaiveTime,
    hourly_rates: &[Decimal],
) -> AppResult<Impact> {
    let secs = (end - start).num_seconds();

    let (lost_hours, anomaly) = if secs < 0 {
        (
            Decimal::ZERO,
            Some(DataAnomaly::IncidentEndBeforeStart { start, end }),
        )
    } else {
        (money::hours_from_seconds(secs), None)
    };

    let charges = hourly_rates
        .iter()
        .map(|rate| money::mul(*rate, lost_hours, "lost cost"))
        .collect::<AppResult<Vec<_>>>()?;
    let lost_cost = money::sum(charges, "lost cost")?;

    Ok(Impact {
        lost_hours,
        lost_cost: money::round_money(lost_cost),
        anomaly,
    })
}
