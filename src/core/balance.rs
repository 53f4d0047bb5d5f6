//! Site balance maintenance and the report built on top of it.

use super::Context;
use super::calculator::balance::{BalanceInputs, compute_balance};
use super::calculator::projection::{
    BudgetExecution, CashRunway, CostProjection, budget_execution, project_final_cost,
    project_runway,
};
use super::policy::Policy;
use crate::db::pool::DbPool;
use crate::db::{attendance, balances, incidents, sites};
use crate::errors::{AppError, AppResult};
use crate::models::SiteId;
use crate::models::balance::SiteBalance;
use crate::models::site::Site;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

pub struct BalanceLogic;

#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub site: Site,
    pub balance: SiteBalance,
    pub cost_projection: CostProjection,
    pub cash_runway: CashRunway,
    pub execution: Option<BudgetExecution>,
}

impl BalanceLogic {
    /// Re-sum every source record of `site` and overwrite its cached balance.
    ///
    /// Must run on the same connection (transaction) as the mutation that
    /// triggered it.
    pub fn recompute(
        conn: &Connection,
        site: &Site,
        policy: &Policy,
        now: NaiveDateTime,
    ) -> AppResult<SiteBalance> {
        let records = attendance::list_for_site(conn, site.id)?;
        let reports = incidents::list_for_site(conn, site.id)?;

        let inputs = BalanceInputs::from_records(&records, &reports)?;
        let balance = compute_balance(site, &inputs, policy, now)?;
        balances::upsert_balance(conn, &balance)?;

        tracing::debug!(
            site = site.id,
            remaining = %balance.remaining_budget,
            profitable = balance.profitable,
            "balance recomputed"
        );
        Ok(balance)
    }

    pub fn recompute_site(
        conn: &Connection,
        site_id: SiteId,
        policy: &Policy,
        now: NaiveDateTime,
    ) -> AppResult<SiteBalance> {
        let site = sites::load_site(conn, site_id)?
            .ok_or_else(|| AppError::NotFound(format!("site {}", site_id)))?;
        Self::recompute(conn, &site, policy, now)
    }

    /// Always rebuilt from source records, never served from the cache.
    pub fn get_site_balance(
        pool: &mut DbPool,
        ctx: &Context,
        site_id: SiteId,
    ) -> AppResult<SiteBalance> {
        let now = ctx.clock.now();
        pool.write_tx(|tx| Self::recompute_site(tx, site_id, &ctx.policy, now))
    }

    pub fn site_report(pool: &mut DbPool, ctx: &Context, site_id: SiteId) -> AppResult<SiteReport> {
        let now = ctx.clock.now();
        let today = ctx.clock.today();

        pool.write_tx(|tx| {
            let site = sites::load_site(tx, site_id)?
                .ok_or_else(|| AppError::NotFound(format!("site {}", site_id)))?;
            let balance = Self::recompute(tx, &site, &ctx.policy, now)?;

            Ok(SiteReport {
                cost_projection: project_final_cost(&balance, &site, today)?,
                cash_runway: project_runway(&balance, &site, today)?,
                execution: budget_execution(&balance, &site)?,
                site,
                balance,
            })
        })
    }
}
