//! Date patterns in the `date()` letter syntax used by stored settings.
//!
//! Settings hold patterns such as `j F Y` or `G \h i \m\i\n`, so rendering
//! goes through this small interpreter instead of chrono's strftime syntax.
//! Month and weekday names pass through the translation catalog.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::i18n::Catalog;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse a stored date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, and
/// RFC 3339. Returns `None` for anything else.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt);
        }
    }
    chrono::DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Time of day `minutes` after midnight, wrapping past 24 hours.
pub fn minutes_after_midnight(minutes: i64) -> NaiveDateTime {
    let minutes = minutes.rem_euclid(24 * 60) as u32;
    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN);
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(time)
}

/// Render `dt` with a `date()` pattern.
pub fn render(pattern: &str, dt: &NaiveDateTime, catalog: &Catalog) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            // Day
            'd' => out.push_str(&format!("{:02}", dt.day())),
            'D' => out.push_str(&short(&catalog.tr(weekday(dt)))),
            'j' => out.push_str(&dt.day().to_string()),
            'l' => out.push_str(&catalog.tr(weekday(dt))),
            'N' => out.push_str(&dt.weekday().number_from_monday().to_string()),
            'S' => out.push_str(ordinal_suffix(dt.day())),
            'w' => out.push_str(&dt.weekday().num_days_from_sunday().to_string()),
            'z' => out.push_str(&dt.ordinal0().to_string()),
            // Week
            'W' => out.push_str(&format!("{:02}", dt.iso_week().week())),
            // Month
            'F' => out.push_str(&catalog.tr(month(dt))),
            'M' => out.push_str(&short(&catalog.tr(month(dt)))),
            'm' => out.push_str(&format!("{:02}", dt.month())),
            'n' => out.push_str(&dt.month().to_string()),
            't' => out.push_str(&days_in_month(dt).to_string()),
            // Year
            'L' => out.push(if is_leap(dt.year()) { '1' } else { '0' }),
            'Y' => out.push_str(&dt.year().to_string()),
            'y' => out.push_str(&format!("{:02}", dt.year().rem_euclid(100))),
            // Time
            'a' => out.push_str(if dt.hour() < 12 { "am" } else { "pm" }),
            'A' => out.push_str(if dt.hour() < 12 { "AM" } else { "PM" }),
            'g' => out.push_str(&hour12(dt).to_string()),
            'G' => out.push_str(&dt.hour().to_string()),
            'h' => out.push_str(&format!("{:02}", hour12(dt))),
            'H' => out.push_str(&format!("{:02}", dt.hour())),
            'i' => out.push_str(&format!("{:02}", dt.minute())),
            's' => out.push_str(&format!("{:02}", dt.second())),
            'U' => out.push_str(&dt.and_utc().timestamp().to_string()),
            other => out.push(other),
        }
    }

    out
}

fn weekday(dt: &NaiveDateTime) -> &'static str {
    WEEKDAYS[dt.weekday().num_days_from_monday() as usize]
}

fn month(dt: &NaiveDateTime) -> &'static str {
    MONTHS[dt.month0() as usize]
}

fn short(name: &str) -> String {
    name.chars().take(3).collect()
}

fn hour12(dt: &NaiveDateTime) -> u32 {
    match dt.hour() % 12 {
        0 => 12,
        h => h,
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(dt: &NaiveDateTime) -> u32 {
    match dt.month() {
        2 if is_leap(dt.year()) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
