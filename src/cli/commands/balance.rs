use crate::cli::parser::Commands;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::core::Context;
use crate::core::balance::{BalanceLogic, SiteReport};
use crate::core::calculator::projection::{CashRunway, CostProjection, ExecutionBand};
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW, color_for_amount};
use crate::utils::format_money;
use crate::utils::formatting::bold;

fn print_report(r: &SiteReport) -> AppResult<()> {
    let b = &r.balance;
    println!("{}\n", bold(&format!("🏗️  {} (site {})", r.site.name, r.site.id)));

    println!("{}• Budget:{}          {}", CYAN, RESET, format_money(r.site.total_budget));
    println!("{}• Wages paid:{}      {}", CYAN, RESET, format_money(b.total_wages));
    println!("{}• Productivity loss:{} {}", CYAN, RESET, format_money(b.total_loss_cost));
    if b.total_penalty.is_zero() {
        println!("{}• Delay penalties:{}  {}none{}", CYAN, RESET, GREY, RESET);
    } else {
        println!("{}• Delay penalties:{}  {}", CYAN, RESET, format_money(b.total_penalty));
    }
    println!("{}• Total spend:{}     {}", CYAN, RESET, format_money(b.total_spend()?));
    println!(
        "{}• Remaining:{}       {}{}{}",
        CYAN,
        RESET,
        color_for_amount(b.remaining_budget),
        format_money(b.remaining_budget),
        RESET
    );
    if b.profitable {
        println!("{}• Status:{}          {}PROFITABLE{}", CYAN, RESET, GREEN, RESET);
    } else {
        println!("{}• Status:{}          {}AT RISK{}", CYAN, RESET, RED, RESET);
    }

    println!();
    match &r.cost_projection {
        CostProjection::Pending => {
            println!("{}• Projection:{} {}pending (site not started){}", CYAN, RESET, GREY, RESET)
        }
        CostProjection::Projected {
            daily_burn,
            projected_final_cost,
            projected_surplus,
        } => {
            println!("{}• Daily burn:{}      {}", CYAN, RESET, format_money(*daily_burn));
            println!(
                "{}• Projected cost:{}  {}",
                CYAN,
                RESET,
                format_money(*projected_final_cost)
            );
            println!(
                "{}• Projected surplus:{} {}{}{}",
                CYAN,
                RESET,
                color_for_amount(*projected_surplus),
                format_money(*projected_surplus),
                RESET
            );
        }
    }

    match &r.cash_runway {
        CashRunway::Pending => {}
        CashRunway::NoSpend => println!("{}• Runway:{}          {}no spend yet{}", CYAN, RESET, GREY, RESET),
        CashRunway::Runway {
            days_of_runway,
            days_remaining,
            cash_constrained,
        } => {
            let color = if *cash_constrained { RED } else { GREEN };
            println!(
                "{}• Runway:{}          {}{:.1} days{} for {} days left",
                CYAN, RESET, color, days_of_runway, RESET, days_remaining
            );
        }
    }

    if let Some(exec) = &r.execution {
        let (color, label) = match exec.band {
            ExecutionBand::Healthy => (GREEN, "healthy"),
            ExecutionBand::Warning => (YELLOW, "warning"),
            ExecutionBand::Critical => (RED, "critical"),
        };
        println!(
            "{}• Budget used:{}     {:.1}% {}({}){}",
            CYAN, RESET, exec.spent_pct, color, label, RESET
        );
    }
    println!();
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Balance { site, json } = cmd {
        let clock = SystemClock;
        let ctx = Context::from_config(&clock, cfg);
        let mut pool = super::open_pool(cfg)?;

        let report = BalanceLogic::site_report(&mut pool, &ctx, *site)?;

        if *json {
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_report(&report)?;
        }
    }

    Ok(())
}
