//! Column codecs shared by the query modules.
//!
//! Money and hours are stored as TEXT so they round-trip without binary
//! floating point; dates and times use fixed ISO layouts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Row;
use rusqlite::types::Type;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TIME_FMT: &str = "%H:%M:%S";
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn date_str(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn time_str(t: &NaiveTime) -> String {
    t.format(TIME_FMT).to_string()
}

pub fn datetime_str(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn column_index(row: &Row, col: &str) -> usize {
    row.as_ref().column_index(col).unwrap_or(0)
}

pub fn get_decimal(row: &Row, col: &str) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(col)?;
    Decimal::from_str(&raw).map_err(|e| conversion_error(column_index(row, col), e))
}

pub fn get_opt_decimal(row: &Row, col: &str) -> rusqlite::Result<Option<Decimal>> {
    match row.get::<_, Option<String>>(col)? {
        Some(raw) => Decimal::from_str(&raw)
            .map(Some)
            .map_err(|e| conversion_error(column_index(row, col), e)),
        None => Ok(None),
    }
}

pub fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT).map_err(|e| conversion_error(column_index(row, col), e))
}

pub fn get_time(row: &Row, col: &str) -> rusqlite::Result<NaiveTime> {
    let raw: String = row.get(col)?;
    NaiveTime::parse_from_str(&raw, TIME_FMT).map_err(|e| conversion_error(column_index(row, col), e))
}

pub fn get_opt_time(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveTime>> {
    match row.get::<_, Option<String>>(col)? {
        Some(raw) => NaiveTime::parse_from_str(&raw, TIME_FMT)
            .map(Some)
            .map_err(|e| conversion_error(column_index(row, col), e)),
        None => Ok(None),
    }
}

pub fn get_opt_datetime(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    match row.get::<_, Option<String>>(col)? {
        Some(raw) => NaiveDateTime::parse_from_str(&raw, DATETIME_FMT)
            .map(Some)
            .map_err(|e| conversion_error(column_index(row, col), e)),
        None => Ok(None),
    }
}

pub fn get_datetime(row: &Row, col: &str) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    NaiveDateTime::parse_from_str(&raw, DATETIME_FMT)
        .map_err(|e| conversion_error(column_index(row, col), e))
}

pub fn get_bool(row: &Row, col: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(col)? != 0)
}
