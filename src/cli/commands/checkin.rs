//! `entry`, `exit` and `mark`.

use crate::cli::parser::{CheckInArgs, Commands};
use crate::config::Config;
use crate::core::Context;
use crate::core::attendance::{AttendanceLogic, Marked};
use crate::errors::{AppResult, Audited};
use crate::models::attendance::{AttendanceRecord, CheckIn};
use crate::models::coords::Coordinates;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_datetime;
use crate::utils::{format_hours, format_money};

fn to_check_in(args: &CheckInArgs, ctx: &Context) -> CheckIn {
    // unparseable coordinates count as missing
    let coords = match (&args.lat, &args.lon) {
        (Some(lat), Some(lon)) => Coordinates::parse(lat, lon),
        _ => None,
    };
    CheckIn {
        timestamp: ctx.clock.now(),
        coords,
        photo: args.photo.clone(),
        client_ip: args.ip.clone(),
    }
}

fn print_entry(a: &Audited<AttendanceRecord>) {
    let rec = &a.value;
    if rec.entry_valid {
        success(format!(
            "Entry recorded: record {} at {} {}",
            rec.id, rec.date, rec.entry_time
        ));
    } else if rec.fraud_flagged {
        warning(format!(
            "Entry recorded as INVALID (impossible travel): record {} at {} {}",
            rec.id, rec.date, rec.entry_time
        ));
    } else {
        warning(format!(
            "Entry recorded as INVALID (outside geofence): record {} at {} {}",
            rec.id, rec.date, rec.entry_time
        ));
    }
    super::report_anomalies(a);
}

fn print_exit(a: &Audited<AttendanceRecord>) {
    let rec = &a.value;
    success(format!(
        "Exit recorded: record {}, worked {}, wage {}",
        rec.id,
        format_hours(rec.worked_hours),
        format_money(rec.wage.unwrap_or_default())
    ));
    super::report_anomalies(a);
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let args = match cmd {
        Commands::Entry { check_in, .. }
        | Commands::Exit { check_in, .. }
        | Commands::Mark { check_in, .. } => check_in,
        _ => return Ok(()),
    };

    let at = args.at.as_deref().map(parse_datetime).transpose()?;
    let clock = super::clock_for(at);
    let ctx = Context::from_config(clock.as_ref(), cfg);
    let check_in = to_check_in(args, &ctx);
    let mut pool = super::open_pool(cfg)?;

    match cmd {
        Commands::Entry { worker, site, .. } => {
            let out = AttendanceLogic::record_entry(&mut pool, &ctx, *worker, *site, check_in)?;
            print_entry(&out);
        }
        Commands::Exit { worker, record, .. } => {
            let out = match record {
                Some(id) => AttendanceLogic::record_exit(&mut pool, &ctx, Some(*id), check_in)?,
                None => AttendanceLogic::exit_open_record(&mut pool, &ctx, *worker, check_in)?,
            };
            print_exit(&out);
        }
        Commands::Mark { worker, site, .. } => {
            match AttendanceLogic::mark(&mut pool, &ctx, *worker, *site, check_in)? {
                Marked::Entry(out) => print_entry(&out),
                Marked::Exit(out) => print_exit(&out),
            }
        }
        _ => {}
    }

    Ok(())
}
