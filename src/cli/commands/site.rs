use crate::cli::parser::{Commands, SiteAction};
use crate::clock::SystemClock;
use crate::config::Config;
use crate::core::Context;
use crate::core::dashboard::DashboardLogic;
use crate::core::registry::RegistryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::coords::Coordinates;
use crate::models::site::NewSite;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::colorize_flag;
use crate::utils::date::parse_date;
use crate::utils::format_money;
use crate::utils::formatting::parse_amount;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Site { action } = cmd else {
        return Ok(());
    };
    let clock = SystemClock;
    let ctx = Context::from_config(&clock, cfg);
    let mut pool = super::open_pool(cfg)?;

    match action {
        SiteAction::Add {
            name,
            lat,
            lon,
            radius,
            budget,
            penalty,
            start,
            end,
            address,
            supervisor,
        } => {
            let center = Coordinates::parse(lat, lon).ok_or_else(|| {
                AppError::Validation(format!("invalid site coordinates '{}, {}'", lat, lon))
            })?;

            let site = RegistryLogic::register_site(
                &mut pool,
                &ctx,
                NewSite {
                    name: name.clone(),
                    address: address.clone(),
                    center,
                    radius_m: radius.unwrap_or(cfg.default_radius_m),
                    total_budget: parse_amount(budget)?,
                    penalty_per_day: parse_amount(penalty)?,
                    start_date: parse_date(start)?,
                    estimated_end_date: parse_date(end)?,
                    supervisor_id: *supervisor,
                },
            )?;
            success(format!(
                "Site {} registered: {} (radius {} m, budget {})",
                site.id,
                site.name,
                site.radius_m,
                format_money(site.total_budget)
            ));
        }
        SiteAction::List { active, supervisor } => {
            let sites = match supervisor {
                Some(id) => DashboardLogic::supervised_sites(&mut pool, *id)?,
                None => RegistryLogic::list_sites(&mut pool, *active)?,
            };
            if sites.is_empty() {
                info("No sites found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 5),
                Column::new("NAME", 24),
                Column::new("BUDGET", 16),
                Column::new("START", 11),
                Column::new("END", 11),
                Column::new("STATUS", 8),
            ]);
            for s in sites {
                table.add_row(vec![
                    s.id.to_string(),
                    s.name,
                    format_money(s.total_budget),
                    s.start_date.to_string(),
                    s.estimated_end_date.to_string(),
                    colorize_flag(s.active, "active", "closed"),
                ]);
            }
            print!("{}", table.render());
        }
        SiteAction::Activate { id } => {
            RegistryLogic::set_site_active(&mut pool, &ctx, *id, true)?;
            success(format!("Site {} is open for check-ins.", id));
        }
        SiteAction::Deactivate { id } => {
            RegistryLogic::set_site_active(&mut pool, &ctx, *id, false)?;
            warning(format!("Site {} no longer accepts check-ins.", id));
        }
    }

    Ok(())
}
