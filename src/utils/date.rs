//! Date helpers: the `dd/MM/yyyy` formats used in the sheets, parsing of
//! user input and sort keys.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

pub const DATE_FMT: &str = "%d/%m/%Y";
pub const DATETIME_FMT: &str = crate::db::cell::DATETIME_FMT;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

/// Parse the date part of a `dd/MM/yyyy[ HH:mm:ss]` value.
pub fn parse_br_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split_whitespace().next()?;
    let parts: Vec<&str> = date_part.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let day = parts[0].parse::<u32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let year = parts[2].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a `dd/MM/yyyy HH:mm[:ss]` value; date-only values map to midnight.
pub fn parse_br_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M"))
        .ok()
        .or_else(|| parse_br_date(s).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Sort key of a stored timestamp; unparseable or empty values sort as the epoch.
pub fn sort_key(s: &str) -> NaiveDateTime {
    parse_br_datetime(s).unwrap_or(NaiveDateTime::UNIX_EPOCH)
}

/// Parse a date typed by a user: `YYYY-MM-DD` or `dd/MM/yyyy`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_br_date(s))
}
