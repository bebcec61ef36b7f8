use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::arabic::to_arabic_digits;

pub const UNKNOWN_TIME: &str = "غير محدد";
const MORNING_MARKER: &str = "ص";
const EVENING_MARKER: &str = "م";

/// Renders a shift time as `hh:mm ص|م` after shifting it by `offset_hours`.
///
/// Accepts ISO date-times (`2024-05-01T08:30:00`, optionally with an offset)
/// and bare `HH:MM[:SS]` clock times. Empty input renders as "غير محدد";
/// anything else that cannot be parsed is returned unchanged.
pub fn format_time_12_hour(text: &str, offset_hours: i32) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return UNKNOWN_TIME.to_string();
    }

    let parsed = if trimmed.contains('T') {
        parse_date_time(trimmed).map(|value| value.time())
    } else if trimmed.contains(':') {
        parse_clock(trimmed)
    } else {
        None
    };

    match parsed {
        Some(time) => {
            let offset = Duration::hours(i64::from(offset_hours));
            let (shifted, _) = time.overflowing_add_signed(offset);
            clock_12_hour(shifted)
        }
        None => text.to_string(),
    }
}

/// `d/m/yyyy` in Arabic-Indic digits.
pub fn format_date_arabic(date: NaiveDate) -> String {
    to_arabic_digits(format!("{}/{}/{}", date.day(), date.month(), date.year()))
}

/// `yyyy/MM/dd HH:mm` in Arabic-Indic digits.
pub fn format_timestamp_arabic(value: NaiveDateTime) -> String {
    to_arabic_digits(value.format("%Y/%m/%d %H:%M"))
}

/// Parses the `yyyy-MM-dd` day used by shift and report queries.
pub fn parse_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    let mut parts = text.split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

fn clock_12_hour(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let marker = if is_pm { EVENING_MARKER } else { MORNING_MARKER };
    format!(
        "{} {marker}",
        to_arabic_digits(format!("{hour:02}:{:02}", time.minute()))
    )
}
