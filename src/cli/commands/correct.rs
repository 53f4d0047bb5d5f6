use crate::cli::parser::Commands;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::core::Context;
use crate::core::attendance::{AttendanceLogic, Correction};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_time;
use crate::utils::{format_hours, format_money};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Correct {
        record,
        entry,
        exit,
        by,
    } = cmd
    {
        let correction = Correction {
            entry_time: parse_optional_time(entry.as_ref())?,
            exit_time: parse_optional_time(exit.as_ref())?,
        };

        let clock = SystemClock;
        let ctx = Context::from_config(&clock, cfg);
        let mut pool = super::open_pool(cfg)?;

        let out = AttendanceLogic::correct(&mut pool, &ctx, *record, correction, *by)?;
        let rec = &out.value;
        success(format!(
            "Record {} corrected: {} → {}, worked {}, wage {}",
            rec.id,
            rec.entry_time,
            rec.exit_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "--:--".into()),
            format_hours(rec.worked_hours),
            format_money(rec.wage.unwrap_or_default())
        ));
        super::report_anomalies(&out);
    }

    Ok(())
}
