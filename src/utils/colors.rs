/// ANSI color helper utilities for terminal output.
use rust_decimal::Decimal;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Amount color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_amount(value: Decimal) -> &'static str {
    if value > Decimal::ZERO {
        GREEN
    } else if value < Decimal::ZERO {
        RED
    } else {
        RESET
    }
}

/// Green "ok" / red label for a validity flag.
pub fn colorize_flag(ok: bool, yes: &str, no: &str) -> String {
    if ok {
        format!("{GREEN}{yes}{RESET}")
    } else {
        format!("{RED}{no}{RESET}")
    }
}

/// Grey placeholder for missing values.
pub fn colorize_optional(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => format!("{GREY}--:--{RESET}"),
    }
}
