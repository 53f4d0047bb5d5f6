//! Check-in flows: entry, exit, the entry/exit toggle and administrative
//! correction.

use super::Context;
use super::balance::BalanceLogic;
use super::calculator::attendance::{close_and_pay, validate_entry};
use super::calculator::fraud::{self, PriorEvent};
use crate::db::log::{log_anomalies, write_log};
use crate::db::pool::DbPool;
use crate::db::{attendance, sites, workers};
use crate::errors::{AppError, AppResult, Audited, DataAnomaly};
use crate::models::attendance::{AttendanceRecord, CheckIn};
use crate::models::coords::Coordinates;
use crate::models::{RecordId, SiteId, WorkerId};
use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rusqlite::Connection;

pub struct AttendanceLogic;

/// Which branch of [`AttendanceLogic::mark`] ran.
#[derive(Debug, Clone)]
pub enum Marked {
    Entry(Audited<AttendanceRecord>),
    Exit(Audited<AttendanceRecord>),
}

/// Input of an administrative correction.
#[derive(Debug, Clone, Default)]
pub struct Correction {
    pub entry_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
}

fn require_coords(coords: Option<Coordinates>) -> AppResult<Coordinates> {
    coords
        .filter(Coordinates::is_finite)
        .ok_or_else(|| AppError::Validation("GPS coordinates are required".into()))
}

impl AttendanceLogic {
    /// Open a new attendance period for `worker_id` at `site_id`.
    ///
    /// The entry is valid when it falls inside the site geofence and the
    /// worker could physically have travelled from their last known position.
    /// An already open record does not block the entry.
    pub fn record_entry(
        pool: &mut DbPool,
        ctx: &Context,
        worker_id: WorkerId,
        site_id: SiteId,
        check_in: CheckIn,
    ) -> AppResult<Audited<AttendanceRecord>> {
        let coords = require_coords(check_in.coords)?;
        let now = ctx.clock.now();

        pool.write_tx(|tx| {
            let worker = workers::load_worker(tx, worker_id)?
                .ok_or_else(|| AppError::Validation(format!("unknown worker {}", worker_id)))?;
            let site = sites::load_site(tx, site_id)?
                .ok_or_else(|| AppError::Validation(format!("unknown site {}", site_id)))?;
            if !site.active {
                return Err(AppError::Validation(format!(
                    "site '{}' is not active",
                    site.name
                )));
            }

            let mut anomalies = Vec::new();
            if let Some(open) = attendance::open_for_worker(tx, worker.id)? {
                anomalies.push(DataAnomaly::OverlappingOpenRecord {
                    worker_id: worker.id,
                    record_id: open.id,
                });
            }

            let prior = attendance::latest_for_worker(tx, worker.id)?.map(|r| PriorEvent::from(&r));
            let flagged = fraud::is_impossible_travel(
                prior.as_ref(),
                check_in.timestamp,
                Some(coords),
                &ctx.policy,
            );
            if flagged {
                tracing::warn!(worker = worker.id, site = site.id, "impossible travel detected");
            }

            let mut rec = AttendanceRecord {
                id: 0,
                worker_id: worker.id,
                site_id: site.id,
                date: check_in.timestamp.date(),
                entry_time: check_in.timestamp.time(),
                entry_coords: coords,
                entry_photo: check_in.photo,
                client_ip: check_in.client_ip,
                exit_time: None,
                exit_coords: None,
                exit_photo: None,
                worked_hours: Decimal::ZERO,
                wage: None,
                entry_valid: validate_entry(&site, Some(coords), flagged),
                fraud_flagged: flagged,
                modified_by: None,
                modified_at: None,
            };
            rec.id = attendance::insert_entry(tx, &rec, now)?;

            BalanceLogic::recompute(tx, &site, &ctx.policy, now)?;

            write_log(
                tx,
                now,
                "entry",
                &format!("record {}", rec.id),
                &format!(
                    "{} entered '{}' ({})",
                    worker.name,
                    site.name,
                    if rec.entry_valid { "valid" } else { "invalid" }
                ),
            )?;
            log_anomalies(tx, now, &anomalies)?;

            Ok(Audited {
                value: rec,
                anomalies,
            })
        })
    }

    /// Close `open_record` and pay the worker for the period.
    pub fn record_exit(
        pool: &mut DbPool,
        ctx: &Context,
        open_record: Option<RecordId>,
        check_out: CheckIn,
    ) -> AppResult<Audited<AttendanceRecord>> {
        let record_id =
            open_record.ok_or_else(|| AppError::NotFound("no open attendance record".into()))?;
        let coords = require_coords(check_out.coords)?;
        let now = ctx.clock.now();

        pool.write_tx(|tx| {
            let mut rec = attendance::load_record(tx, record_id)?
                .ok_or_else(|| AppError::NotFound(format!("attendance record {}", record_id)))?;
            if !rec.is_open() {
                return Err(AppError::Validation(format!(
                    "attendance record {} is already closed",
                    rec.id
                )));
            }

            rec.exit_coords = Some(coords);
            rec.exit_photo = check_out.photo;

            let anomalies = Self::close(tx, ctx, &mut rec, check_out.timestamp.time(), now)?;

            write_log(
                tx,
                now,
                "exit",
                &format!("record {}", rec.id),
                &format!(
                    "worked {}h, wage {}",
                    rec.worked_hours,
                    rec.wage.unwrap_or_default()
                ),
            )?;
            log_anomalies(tx, now, &anomalies)?;

            Ok(Audited {
                value: rec,
                anomalies,
            })
        })
    }

    /// Close the worker's most recent open record.
    pub fn exit_open_record(
        pool: &mut DbPool,
        ctx: &Context,
        worker_id: WorkerId,
        check_out: CheckIn,
    ) -> AppResult<Audited<AttendanceRecord>> {
        let open = attendance::open_for_worker(&pool.conn, worker_id)?.map(|r| r.id);
        Self::record_exit(pool, ctx, open, check_out)
    }

    /// Single-button check-in: closes the worker's open record of the
    /// check-in day if there is one, opens a new one otherwise.
    pub fn mark(
        pool: &mut DbPool,
        ctx: &Context,
        worker_id: WorkerId,
        site_id: SiteId,
        check_in: CheckIn,
    ) -> AppResult<Marked> {
        let day = check_in.timestamp.date();
        match attendance::open_for_worker_on(&pool.conn, worker_id, &day)? {
            Some(open) => Ok(Marked::Exit(Self::record_exit(
                pool,
                ctx,
                Some(open.id),
                check_in,
            )?)),
            None => Ok(Marked::Entry(Self::record_entry(
                pool, ctx, worker_id, site_id, check_in,
            )?)),
        }
    }

    /// Administrative correction of entry and/or exit time.
    ///
    /// Setting an exit on an open record closes it without exit coordinates.
    pub fn correct(
        pool: &mut DbPool,
        ctx: &Context,
        record_id: RecordId,
        correction: Correction,
        editor_id: WorkerId,
    ) -> AppResult<Audited<AttendanceRecord>> {
        if correction.entry_time.is_none() && correction.exit_time.is_none() {
            return Err(AppError::Validation(
                "nothing to correct: specify an entry or exit time".into(),
            ));
        }
        let now = ctx.clock.now();

        pool.write_tx(|tx| {
            let editor = workers::load_worker(tx, editor_id)?
                .ok_or_else(|| AppError::Validation(format!("unknown editor {}", editor_id)))?;
            if !editor.role.can_supervise() {
                return Err(AppError::Validation(format!(
                    "{} is not allowed to correct attendance",
                    editor.name
                )));
            }

            let mut rec = attendance::load_record(tx, record_id)?
                .ok_or_else(|| AppError::NotFound(format!("attendance record {}", record_id)))?;

            if let Some(entry) = correction.entry_time {
                rec.entry_time = entry;
            }
            rec.modified_by = Some(editor.id);
            rec.modified_at = Some(now);

            let anomalies = match correction.exit_time.or(rec.exit_time) {
                Some(exit) => Self::close(tx, ctx, &mut rec, exit, now)?,
                None => {
                    attendance::update_record(tx, &rec)?;
                    Vec::new()
                }
            };

            write_log(
                tx,
                now,
                "correct",
                &format!("record {}", rec.id),
                &format!("corrected by {}", editor.name),
            )?;
            log_anomalies(tx, now, &anomalies)?;

            Ok(Audited {
                value: rec,
                anomalies,
            })
        })
    }

    /// Compute hours and wage for `rec` ending at `exit`, persist it and
    /// rebuild the site balance.
    fn close(
        conn: &Connection,
        ctx: &Context,
        rec: &mut AttendanceRecord,
        exit: NaiveTime,
        now: NaiveDateTime,
    ) -> AppResult<Vec<DataAnomaly>> {
        let worker = workers::load_worker(conn, rec.worker_id)?
            .ok_or_else(|| AppError::NotFound(format!("worker {}", rec.worker_id)))?;

        let payment = close_and_pay(rec.date, rec.entry_time, exit, &worker, &ctx.policy)?;
        rec.exit_time = Some(exit);
        rec.worked_hours = payment.worked_hours;
        rec.wage = Some(payment.wage);
        attendance::update_record(conn, rec)?;

        BalanceLogic::recompute_site(conn, rec.site_id, &ctx.policy, now)?;

        Ok(payment.anomaly.into_iter().collect())
    }
}
