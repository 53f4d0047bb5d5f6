use crate::cli::parser::{Commands, WorkerAction};
use crate::clock::SystemClock;
use crate::config::Config;
use crate::core::Context;
use crate::core::registry::RegistryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::worker::NewWorker;
use crate::ui::messages::{info, success};
use crate::utils::format_money;
use crate::utils::formatting::parse_amount;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = cmd else {
        return Ok(());
    };
    let mut pool = super::open_pool(cfg)?;

    match action {
        WorkerAction::Add {
            name,
            role,
            daily,
            hourly,
            national_id,
            phone,
        } => {
            let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
            let clock = SystemClock;
            let ctx = Context::from_config(&clock, cfg);
            let worker = RegistryLogic::register_worker(
                &mut pool,
                &ctx,
                NewWorker {
                    name: name.clone(),
                    national_id: national_id.clone(),
                    phone: phone.clone(),
                    role,
                    daily_rate: parse_amount(daily)?,
                    hourly_rate: parse_amount(hourly)?,
                },
            )?;
            success(format!(
                "Worker {} registered: {} ({})",
                worker.id,
                worker.name,
                worker.role.to_db_str()
            ));
        }
        WorkerAction::List => {
            let workers = RegistryLogic::list_workers(&mut pool)?;
            if workers.is_empty() {
                info("No workers registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 5),
                Column::new("NAME", 24),
                Column::new("ROLE", 11),
                Column::new("DAILY", 12),
                Column::new("HOURLY", 10),
            ]);
            for w in workers {
                table.add_row(vec![
                    w.id.to_string(),
                    w.name,
                    w.role.to_db_str().to_string(),
                    format_money(w.daily_rate),
                    format_money(w.hourly_rate),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
