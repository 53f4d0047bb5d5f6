//! Forward-looking figures derived from a balance and the site schedule.

use super::money;
use crate::errors::AppResult;
use crate::models::balance::SiteBalance;
use crate::models::site::Site;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CostProjection {
    /// The site has not been running for a full day yet.
    Pending,
    Projected {
        daily_burn: Decimal,
        projected_final_cost: Decimal,
        projected_surplus: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CashRunway {
    Pending,
    NoSpend,
    Runway {
        days_of_runway: Decimal,
        days_remaining: i64,
        cash_constrained: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionBand {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetExecution {
    pub spent_pct: Decimal,
    pub band: ExecutionBand,
}

fn days_elapsed(site: &Site, today: NaiveDate) -> i64 {
    (today - site.start_date).num_days()
}

/// Average operating spend (wages + losses) per elapsed day.
pub fn daily_operating_burn(
    balance: &SiteBalance,
    site: &Site,
    today: NaiveDate,
) -> AppResult<Option<Decimal>> {
    let days = days_elapsed(site, today);
    if days <= 0 {
        return Ok(None);
    }
    let burn = money::div(balance.operating_spend()?, Decimal::from(days), "daily burn")?;
    Ok(Some(burn))
}

/// Penalties are added once as incurred amounts; only wages and losses are
/// extrapolated over the contract length.
pub fn project_final_cost(
    balance: &SiteBalance,
    site: &Site,
    today: NaiveDate,
) -> AppResult<CostProjection> {
    let Some(daily_burn) = daily_operating_burn(balance, site, today)? else {
        return Ok(CostProjection::Pending);
    };

    let extrapolated = money::mul(
        daily_burn,
        Decimal::from(site.contract_days()),
        "projected final cost",
    )?;
    let projected_final_cost =
        money::add(extrapolated, balance.total_penalty, "projected final cost")?;
    let projected_surplus =
        money::sub(site.total_budget, projected_final_cost, "projected surplus")?;

    Ok(CostProjection::Projected {
        daily_burn,
        projected_final_cost,
        projected_surplus,
    })
}

pub fn project_runway(
    balance: &SiteBalance,
    site: &Site,
    today: NaiveDate,
) -> AppResult<CashRunway> {
    let Some(daily_burn) = daily_operating_burn(balance, site, today)? else {
        return Ok(CashRunway::Pending);
    };
    if daily_burn <= Decimal::ZERO {
        return Ok(CashRunway::NoSpend);
    }

    let days_of_runway = money::div(balance.remaining_budget, daily_burn, "days of runway")?;
    let days_remaining = (site.estimated_end_date - today).num_days();

    Ok(CashRunway::Runway {
        days_of_runway,
        days_remaining,
        cash_constrained: days_of_runway < Decimal::from(days_remaining),
    })
}

/// Share of the budget already consumed. `None` for a zero budget.
pub fn budget_execution(balance: &SiteBalance, site: &Site) -> AppResult<Option<BudgetExecution>> {
    if site.total_budget.is_zero() {
        return Ok(None);
    }

    let spent = money::sub(site.total_budget, balance.remaining_budget, "budget spent")?;
    let share = money::div(spent, site.total_budget, "budget execution")?;
    let spent_pct = money::mul(share, dec!(100), "budget execution")?;

    let band = if spent_pct > dec!(90) {
        ExecutionBand::Critical
    } else if spent_pct > dec!(70) {
        ExecutionBand::Warning
    } else {
        ExecutionBand::Healthy
    };

    Ok(Some(BudgetExecution { spent_pct, band }))
}
