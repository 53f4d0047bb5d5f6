use crate::cli::parser::Commands;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::core::registry::RegistryLogic;
use crate::errors::AppResult;
use crate::utils::colors::{RED, RESET, colorize_flag, colorize_optional};
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::{format_hours, format_money};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { site, date } = cmd {
        let date = parse_optional_date(date.as_ref())?.unwrap_or_else(|| SystemClock.today());
        let mut pool = super::open_pool(cfg)?;

        let dash = DashboardLogic::site_dashboard(&mut pool, *site, date)?;
        let names: HashMap<i64, String> = RegistryLogic::list_workers(&mut pool)?
            .into_iter()
            .map(|w| (w.id, w.name))
            .collect();

        println!(
            "{}\n",
            bold(&format!("📋 {} · {}", dash.site.name, dash.date))
        );
        println!(
            "Present: {}   GPS alerts: {}{}{}\n",
            dash.present,
            if dash.gps_alerts > 0 { RED } else { RESET },
            dash.gps_alerts,
            RESET
        );

        if dash.records.is_empty() {
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("REC", 5),
            Column::new("WORKER", 22),
            Column::new("IN", 9),
            Column::new("OUT", 9),
            Column::new("HOURS", 8),
            Column::new("WAGE", 12),
            Column::new("GPS", 8),
        ]);
        for r in dash.records {
            table.add_row(vec![
                r.id.to_string(),
                names
                    .get(&r.worker_id)
                    .cloned()
                    .unwrap_or_else(|| r.worker_id.to_string()),
                r.entry_time.format("%H:%M").to_string(),
                colorize_optional(r.exit_time.map(|t| t.format("%H:%M").to_string())),
                format_hours(r.worked_hours),
                r.wage.map(format_money).unwrap_or_default(),
                colorize_flag(r.entry_valid, "ok", "alert"),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
