//! Productivity-loss incident reports.

use super::Context;
use super::balance::BalanceLogic;
use super::calculator::impact::compute_impact;
use crate::db::log::{log_anomalies, write_log};
use crate::db::pool::DbPool;
use crate::db::{incidents, sites, workers};
use crate::errors::{AppError, AppResult, Audited};
use crate::models::incident::{IncidentReport, NewIncident};
use crate::models::{IncidentId, SiteId, WorkerId};
use rust_decimal::Decimal;
use rusqlite::Connection;

pub struct IncidentLogic;

fn dedup(ids: &[WorkerId]) -> Vec<WorkerId> {
    let mut out = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

impl IncidentLogic {
    pub fn submit(
        pool: &mut DbPool,
        ctx: &Context,
        input: NewIncident,
    ) -> AppResult<Audited<IncidentReport>> {
        if input.reason.trim().is_empty() {
            return Err(AppError::Validation("an incident needs a reason".into()));
        }
        let delay_days = input.delay_days.unwrap_or(Decimal::ZERO);
        if delay_days < Decimal::ZERO {
            return Err(AppError::Validation(
                "delay days cannot be negative".into(),
            ));
        }

        let now = ctx.clock.now();

        pool.write_tx(|tx| {
            let site = sites::load_site(tx, input.site_id)?
                .ok_or_else(|| AppError::Validation(format!("unknown site {}", input.site_id)))?;
            let supervisor = workers::load_worker(tx, input.supervisor_id)?.ok_or_else(|| {
                AppError::Validation(format!("unknown supervisor {}", input.supervisor_id))
            })?;
            if !supervisor.role.can_supervise() {
                return Err(AppError::Validation(format!(
                    "{} is not allowed to file incident reports",
                    supervisor.name
                )));
            }

            let mut report = IncidentReport {
                id: 0,
                site_id: site.id,
                supervisor_id: Some(supervisor.id),
                date: input.date,
                start_time: input.start_time,
                end_time: input.end_time,
                reason: input.reason.trim().to_string(),
                affected: Vec::new(),
                delay_days: delay_days.round_dp(1),
                lost_hours: Decimal::ZERO,
                lost_cost: Decimal::ZERO,
                read: false,
            };
            report.id = incidents::insert_incident(tx, &report, now)?;

            write_log(
                tx,
                now,
                "incident",
                &format!("incident {}", report.id),
                &format!("filed on '{}' by {}", site.name, supervisor.name),
            )?;

            Self::apply_affected(tx, ctx, report.id, &input.affected)
        })
    }

    /// Replace the affected workers of an incident and recompute its impact.
    pub fn set_affected(
        pool: &mut DbPool,
        ctx: &Context,
        id: IncidentId,
        workers: &[WorkerId],
    ) -> AppResult<Audited<IncidentReport>> {
        pool.write_tx(|tx| Self::apply_affected(tx, ctx, id, workers))
    }

    pub fn add_affected(
        pool: &mut DbPool,
        ctx: &Context,
        id: IncidentId,
        workers: &[WorkerId],
    ) -> AppResult<Audited<IncidentReport>> {
        Self::update_affected(pool, ctx, id, workers, &[])
    }

    pub fn remove_affected(
        pool: &mut DbPool,
        ctx: &Context,
        id: IncidentId,
        workers: &[WorkerId],
    ) -> AppResult<Audited<IncidentReport>> {
        Self::update_affected(pool, ctx, id, &[], workers)
    }

    /// Add `add` to and drop `remove` from the current affected set as one
    /// change. A worker named in both lists ends up removed.
    pub fn update_affected(
        pool: &mut DbPool,
        ctx: &Context,
        id: IncidentId,
        add: &[WorkerId],
        remove: &[WorkerId],
    ) -> AppResult<Audited<IncidentReport>> {
        pool.write_tx(|tx| {
            let mut set = incidents::load_affected(tx, id)?;
            set.extend_from_slice(add);
            set.retain(|w| !remove.contains(w));
            Self::apply_affected(tx, ctx, id, &set)
        })
    }

    pub fn clear_affected(
        pool: &mut DbPool,
        ctx: &Context,
        id: IncidentId,
    ) -> AppResult<Audited<IncidentReport>> {
        Self::set_affected(pool, ctx, id, &[])
    }

    /// Acknowledge reports. Fails without touching anything if one id is
    /// unknown.
    pub fn mark_read(pool: &mut DbPool, ctx: &Context, ids: &[IncidentId]) -> AppResult<usize> {
        let now = ctx.clock.now();
        pool.write_tx(|tx| {
            let mut count = 0;
            for id in ids {
                if incidents::mark_read(tx, *id)? == 0 {
                    return Err(AppError::NotFound(format!("incident {}", id)));
                }
                count += 1;
            }
            write_log(
                tx,
                now,
                "incident_read",
                "",
                &format!("{} report(s) acknowledged", count),
            )?;
            Ok(count)
        })
    }

    pub fn list(
        pool: &mut DbPool,
        site: Option<SiteId>,
        unread_only: bool,
    ) -> AppResult<Vec<IncidentReport>> {
        incidents::list_incidents(&pool.conn, site, unread_only)
    }

    /// Store the new affected set, recompute lost hours/cost and the site
    /// balance. Every membership change goes through here.
    fn apply_affected(
        conn: &Connection,
        ctx: &Context,
        id: IncidentId,
        affected: &[WorkerId],
    ) -> AppResult<Audited<IncidentReport>> {
        let mut report = incidents::load_incident(conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("incident {}", id)))?;

        let affected = dedup(affected);
        let rates: Vec<Decimal> = workers::load_workers(conn, &affected)?
            .iter()
            .map(|w| w.hourly_rate)
            .collect();
        incidents::replace_affected(conn, id, &affected)?;

        let impact = compute_impact(report.start_time, report.end_time, &rates)?;
        report.affected = affected;
        report.lost_hours = impact.lost_hours;
        report.lost_cost = impact.lost_cost;
        incidents::update_impact(conn, &report)?;

        let now = ctx.clock.now();
        BalanceLogic::recompute_site(conn, report.site_id, &ctx.policy, now)?;

        let anomalies: Vec<_> = impact.anomaly.into_iter().collect();
        log_anomalies(conn, now, &anomalies)?;

        Ok(Audited {
            value: report,
            anomalies,
        })
    }
}
