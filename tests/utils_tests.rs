use rust_decimal_macros::dec;
use sitelogger::utils::date::{parse_date, parse_datetime};
use sitelogger::utils::formatting::parse_amount;
use sitelogger::utils::time::parse_time;
use sitelogger::utils::{format_hours, format_money};

#[test]
fn test_money_is_grouped_with_two_decimals() {
    assert_eq!(format_money(dec!(1234567.5)), "1,234,567.50");
    assert_eq!(format_money(dec!(-8000)), "-8,000.00");
    assert_eq!(format_money(dec!(0)), "0.00");
    assert_eq!(format_money(dec!(999)), "999.00");
    assert_eq!(format_hours(dec!(7.99)), "7.99h");
}

#[test]
fn test_amounts_must_be_non_negative_numbers() {
    assert_eq!(parse_amount("150.25").unwrap(), dec!(150.25));
    assert!(parse_amount("-1").is_err());
    assert!(parse_amount("abc").is_err());
}

#[test]
fn test_datetime_accepts_both_separators() {
    let a = parse_datetime("2025-06-02 08:30").unwrap();
    let b = parse_datetime("2025-06-02T08:30:00").unwrap();
    assert_eq!(a, b);
    assert!(parse_datetime("02/06/2025 08:30").is_err());
    assert!(parse_date("2025-02-30").is_err());
}

#[test]
fn test_time_accepts_optional_seconds() {
    assert_eq!(parse_time("08:30"), parse_time("08:30:00"));
    assert!(parse_time("8h30").is_none());
}
