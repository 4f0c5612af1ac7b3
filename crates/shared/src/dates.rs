//! Date parsing and formatting for backend date strings
//!
//! The backend is inconsistent about date formats: event listings use
//! `DD/MM/YYYY HH:MM:SS`, some endpoints answer ISO dates, and session
//! payloads carry RFC 3339 timestamps. Everything here works on local
//! calendar days (`NaiveDate`).

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

fn ymd_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})(?:\b|T|\s)").expect("valid regex")
    })
}

fn dmy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{4})(?:\b|T|\s|$)").expect("valid regex")
    })
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    start_of_local_day(Local::now())
}

/// Calendar day of a local timestamp
pub fn start_of_local_day(moment: DateTime<Local>) -> NaiveDate {
    moment.date_naive()
}

fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse the date formats the backend emits.
///
/// Accepts `YYYY-MM-DD` / `YYYY/MM/DD` and `DD-MM-YYYY` / `DD/MM/YYYY`
/// prefixes (an optional time part is ignored), then falls back to full
/// RFC 3339 / RFC 2822 timestamps, which are converted to the local day.
/// Impossible calendar dates such as `31/02/2026` yield `None`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(caps) = ymd_pattern().captures(value) {
        return build_date(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = dmy_pattern().captures(value) {
        return build_date(&caps[3], &caps[2], &caps[1]);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(start_of_local_day(parsed.with_timezone(&Local)));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(start_of_local_day(parsed.with_timezone(&Local)));
    }

    None
}

/// Parse a strict `DD/MM/YYYY` date, ignoring any trailing time part
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split_whitespace().next()?;
    let parts: Vec<&str> = date_part.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    build_date(parts[2], parts[1], parts[0])
}

/// Parse a `DD/MM/YYYY HH:MM[:SS]` timestamp
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    NaiveDateTime::parse_from_str(value, "%d/%m/%Y %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%d/%m/%Y %H:%M"))
        .ok()
}

/// Display format used in event listings (`DD-MM-YYYY`), `-` when unparseable
pub fn format_display_date(raw: &str) -> String {
    parse_flexible_date(raw)
        .map(format_date)
        .unwrap_or_else(|| "-".to_string())
}

/// Format a date as `DD-MM-YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Format a date with a fixed time as `DD/MM/YYYY HH:MM:00`, the shape
/// event create/update payloads expect
pub fn format_date_with_time(date: NaiveDate, hour: u32, minute: u32) -> String {
    let time = date
        .and_hms_opt(hour.min(23), minute.min(59), 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    format!(
        "{} {:02}:{:02}:00",
        date.format("%d/%m/%Y"),
        time.hour(),
        time.minute()
    )
}

/// Clamp an end date so that it never precedes the start date
pub fn adjust_end_date(start: NaiveDate, end: NaiveDate) -> NaiveDate {
    if end < start {
        start
    } else {
        end
    }
}

/// An event ending on `end` is still current or upcoming on `today`
pub fn is_current_or_future(end: NaiveDate, today: NaiveDate) -> bool {
    end >= today
}
