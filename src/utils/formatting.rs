//! Formatting and parsing helpers for CLI output and input.

use crate::errors::{AppError, AppResult};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Two decimals with thousands separators: `1234567.5` → `1,234,567.50`.
pub fn format_money(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac)
}

pub fn format_hours(hours: Decimal) -> String {
    format!("{:.2}h", hours)
}

pub fn parse_amount(s: &str) -> AppResult<Decimal> {
    let v = Decimal::from_str(s.trim()).map_err(|_| AppError::InvalidAmount(s.to_string()))?;
    if v < Decimal::ZERO {
        return Err(AppError::InvalidAmount(s.to_string()));
    }
    Ok(v)
}

