use crate::errors::{AppError, AppResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Seconds → hours, truncated to 2 decimals so a duration never rounds up
/// across a threshold.
pub fn hours_from_seconds(secs: i64) -> Decimal {
    (Decimal::from(secs) / Decimal::from(3600))
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Money amounts are kept at 2 decimals, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Checked arithmetic: an amount outside the Decimal range is an input error,
// never a panic.

fn out_of_range(what: &str) -> AppError {
    AppError::InvalidAmount(format!("{} is out of range", what))
}

pub fn add(a: Decimal, b: Decimal, what: &str) -> AppResult<Decimal> {
    a.checked_add(b).ok_or_else(|| out_of_range(what))
}

pub fn sub(a: Decimal, b: Decimal, what: &str) -> AppResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| out_of_range(what))
}

pub fn mul(a: Decimal, b: Decimal, what: &str) -> AppResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| out_of_range(what))
}

pub fn div(a: Decimal, b: Decimal, what: &str) -> AppResult<Decimal> {
    a.checked_div(b).ok_or_else(|| out_of_range(what))
}

pub fn sum<I>(amounts: I, what: &str) -> AppResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(acc, v, what))
}
