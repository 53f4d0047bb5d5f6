use super::money;
use crate::core::policy::Policy;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::balance::SiteBalance;
use crate::models::incident::IncidentReport;
use crate::models::site::Site;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Sums gathered from a site's source records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceInputs {
    pub total_wages: Decimal,
    pub total_loss_cost: Decimal,
    pub total_delay_days: Decimal,
}

impl BalanceInputs {
    pub fn from_records(
        attendance: &[AttendanceRecord],
        incidents: &[IncidentReport],
    ) -> AppResult<Self> {
        Ok(Self {
            // records still open carry no wage
            total_wages: money::sum(attendance.iter().filter_map(|a| a.wage), "wages")?,
            total_loss_cost: money::sum(incidents.iter().map(|i| i.lost_cost), "loss cost")?,
            total_delay_days: money::sum(incidents.iter().map(|i| i.delay_days), "delay days")?,
        })
    }
}

pub fn compute_balance(
    site: &Site,
    inputs: &BalanceInputs,
    policy: &Policy,
    updated_at: NaiveDateTime,
) -> AppResult<SiteBalance> {
    let total_penalty = money::round_money(money::mul(
        inputs.total_delay_days,
        site.penalty_per_day,
        "penalty",
    )?);
    let operating = money::add(inputs.total_wages, inputs.total_loss_cost, "spend")?;
    let spend = money::add(operating, total_penalty, "spend")?;
    let remaining_budget = money::sub(site.total_budget, spend, "remaining budget")?;
    let threshold = money::mul(site.total_budget, policy.profit_margin, "profit threshold")?;

    Ok(SiteBalance {
        site_id: site.id,
        total_wages: inputs.total_wages,
        total_loss_cost: inputs.total_loss_cost,
        total_penalty,
        remaining_budget,
        profitable: remaining_budget > threshold,
        updated_at,
    })
}
