//! Value formats of the date, time and color controls.
//!
//! These mirror what the corresponding native controls can produce: a value is either
//! empty or well formed.

use chrono::{Duration, Local, NaiveDate, NaiveTime, Timelike};

/// Storage format of the date control.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format of the time control.
pub const TIME_FORMAT: &str = "%H:%M";

/// Preset colors offered by the color control. The first entry is the default.
pub static COLOR_PALETTE: &[&str] = &[
    "#4f46e5", "#dc2626", "#16a34a", "#f59e0b", "#0ea5e9", "#9333ea", "#000000", "#ffffff",
];

/// Parses a stored date value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parses a stored time value.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

/// Returns `true` for `#rrggbb` hex colors.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Steps a date value by `days`. An empty or malformed value starts from today.
pub fn step_date(value: &str, days: i64) -> String {
    let base = parse_date(value).unwrap_or_else(|| Local::now().date_naive());
    let stepped = base
        .checked_add_signed(Duration::days(days))
        .unwrap_or(base);
    stepped.format(DATE_FORMAT).to_string()
}

/// Steps a time value by `minutes`, wrapping at midnight. An empty or malformed value
/// starts from the current local time.
pub fn step_time(value: &str, minutes: i64) -> String {
    let base = parse_time(value).unwrap_or_else(|| {
        let now = Local::now().time();
        NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(NaiveTime::MIN)
    });
    let (stepped, _) = base.overflowing_add_signed(Duration::minutes(minutes));
    stepped.format(TIME_FORMAT).to_string()
}

/// Returns the palette color after (or before) `current`, wrapping around.
///
/// A color not in the palette steps to the first (or last) entry.
pub fn cycle_color(current: &str, forward: bool) -> &'static str {
    let len = COLOR_PALETTE.len();
    let next = match COLOR_PALETTE.iter().position(|c| c.eq_ignore_ascii_case(current)) {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    COLOR_PALETTE[next]
}
