use crate::cli::parser::{Commands, IncidentAction};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::core::Context;
use crate::core::incident::IncidentLogic;
use crate::errors::{AppError, AppResult, Audited};
use crate::models::incident::{IncidentReport, NewIncident};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_flag;
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::parse_amount;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_required_time;
use crate::utils::{format_hours, format_money};

fn print_impact(verb: &str, a: &Audited<IncidentReport>) {
    let r = &a.value;
    success(format!(
        "Incident {} {}: {} worker(s), lost {}, cost {}",
        r.id,
        verb,
        r.affected.len(),
        format_hours(r.lost_hours),
        format_money(r.lost_cost)
    ));
    super::report_anomalies(a);
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Incident { action } = cmd else {
        return Ok(());
    };
    let clock = SystemClock;
    let ctx = Context::from_config(&clock, cfg);
    let mut pool = super::open_pool(cfg)?;

    match action {
        IncidentAction::Add {
            site,
            by,
            date,
            start,
            end,
            reason,
            workers,
            delay,
        } => {
            let input = NewIncident {
                site_id: *site,
                supervisor_id: *by,
                date: parse_optional_date(date.as_ref())?.unwrap_or_else(|| clock.today()),
                start_time: parse_required_time(start)?,
                end_time: parse_required_time(end)?,
                reason: reason.clone(),
                affected: workers.clone(),
                delay_days: delay.as_deref().map(parse_amount).transpose()?,
            };
            let out = IncidentLogic::submit(&mut pool, &ctx, input)?;
            print_impact("filed", &out);
        }
        IncidentAction::Workers {
            id,
            set,
            add,
            remove,
            clear,
        } => {
            let out = if *clear {
                IncidentLogic::clear_affected(&mut pool, &ctx, *id)?
            } else if let Some(set) = set {
                IncidentLogic::set_affected(&mut pool, &ctx, *id, set)?
            } else if !add.is_empty() || !remove.is_empty() {
                IncidentLogic::update_affected(&mut pool, &ctx, *id, add, remove)?
            } else {
                return Err(AppError::Validation(
                    "specify --set, --add, --remove or --clear".into(),
                ));
            };
            print_impact("updated", &out);
        }
        IncidentAction::Read { ids } => {
            let n = IncidentLogic::mark_read(&mut pool, &ctx, ids)?;
            success(format!("{} incident report(s) marked as read.", n));
        }
        IncidentAction::List { site, unread } => {
            let reports = IncidentLogic::list(&mut pool, *site, *unread)?;
            if reports.is_empty() {
                info("No incident reports.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 5),
                Column::new("SITE", 5),
                Column::new("DATE", 11),
                Column::new("WINDOW", 12),
                Column::new("WORKERS", 8),
                Column::new("LOST", 9),
                Column::new("COST", 14),
                Column::new("REASON", 28),
                Column::new("READ", 5),
            ]);
            for r in reports {
                table.add_row(vec![
                    r.id.to_string(),
                    r.site_id.to_string(),
                    r.date.to_string(),
                    format!(
                        "{}-{}",
                        r.start_time.format("%H:%M"),
                        r.end_time.format("%H:%M")
                    ),
                    r.affected.len().to_string(),
                    format_hours(r.lost_hours),
                    format_money(r.lost_cost),
                    r.reason,
                    colorize_flag(r.read, "yes", "no"),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
