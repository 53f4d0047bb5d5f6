//! Registration of workers and sites.

use super::Context;
use super::balance::BalanceLogic;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::{sites, workers};
use crate::errors::{AppError, AppResult};
use crate::models::site::{NewSite, Site};
use crate::models::worker::{NewWorker, Worker};
use crate::models::SiteId;
use rust_decimal::Decimal;

pub struct RegistryLogic;

impl RegistryLogic {
    pub fn register_worker(
        pool: &mut DbPool,
        ctx: &Context,
        input: NewWorker,
    ) -> AppResult<Worker> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("worker name is required".into()));
        }
        if input.daily_rate < Decimal::ZERO || input.hourly_rate < Decimal::ZERO {
            return Err(AppError::Validation(
                "wage rates cannot be negative".into(),
            ));
        }

        let now = ctx.clock.now();

        pool.write_tx(|tx| {
            let id = workers::insert_worker(tx, &input, now)?;
            write_log(tx, now, "worker_add", &format!("worker {}", id), &input.name)?;
            workers::load_worker(tx, id)?
                .ok_or_else(|| AppError::Other(format!("worker {} vanished after insert", id)))
        })
    }

    pub fn list_workers(pool: &mut DbPool) -> AppResult<Vec<Worker>> {
        workers::list_workers(&pool.conn)
    }

    /// Register a site and create its (empty) balance.
    pub fn register_site(pool: &mut DbPool, ctx: &Context, input: NewSite) -> AppResult<Site> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("site name is required".into()));
        }
        if !input.center.is_finite() {
            return Err(AppError::Validation("site coordinates are not numeric".into()));
        }
        if !(input.radius_m.is_finite() && input.radius_m > 0.0) {
            return Err(AppError::Validation(
                "geofence radius must be a positive number of meters".into(),
            ));
        }
        if input.total_budget < Decimal::ZERO || input.penalty_per_day < Decimal::ZERO {
            return Err(AppError::Validation(
                "budget and penalty rate cannot be negative".into(),
            ));
        }
        if input.estimated_end_date < input.start_date {
            return Err(AppError::Validation(format!(
                "estimated end {} is before start {}",
                input.estimated_end_date, input.start_date
            )));
        }
        let now = ctx.clock.now();

        pool.write_tx(|tx| {
            if let Some(sup) = input.supervisor_id {
                let w = workers::load_worker(tx, sup)?
                    .ok_or_else(|| AppError::Validation(format!("unknown supervisor {}", sup)))?;
                if !w.role.can_supervise() {
                    return Err(AppError::Validation(format!(
                        "{} cannot supervise a site",
                        w.name
                    )));
                }
            }

            let id = sites::insert_site(tx, &input)?;
            let site = sites::load_site(tx, id)?
                .ok_or_else(|| AppError::Other(format!("site {} vanished after insert", id)))?;
            BalanceLogic::recompute(tx, &site, &ctx.policy, now)?;
            write_log(tx, now, "site_add", &format!("site {}", id), &site.name)?;
            Ok(site)
        })
    }

    pub fn list_sites(pool: &mut DbPool, only_active: bool) -> AppResult<Vec<Site>> {
        sites::list_sites(&pool.conn, only_active)
    }

    pub fn set_site_active(
        pool: &mut DbPool,
        ctx: &Context,
        id: SiteId,
        active: bool,
    ) -> AppResult<()> {
        let now = ctx.clock.now();
        pool.write_tx(|tx| {
            if sites::set_active(tx, id, active)? == 0 {
                return Err(AppError::NotFound(format!("site {}", id)));
            }
            let op = if active { "site_activate" } else { "site_deactivate" };
            write_log(tx, now, op, &format!("site {}", id), op)?;
            Ok(())
        })
    }
}
