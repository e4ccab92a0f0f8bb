//! Calendar arithmetic
//!
//! Month boundaries and day/month offsets computed on the wall clock of a
//! zone, so adding a day across a daylight saving change keeps the time of day.

use chrono::{Datelike, Days, Duration, Months, NaiveDate};

use crate::format::{format_in, FormatSpec};
use crate::zone::TimeZoneRef;
use crate::Timestamp;

/// Midnight on the first day of the month containing `ts`, local zone
pub fn start_of_month(ts: &Timestamp) -> Option<Timestamp> {
    start_of_month_in(ts, &TimeZoneRef::Local)
}

/// Midnight on the first day of the month containing `ts`, in `zone`
pub fn start_of_month_in(ts: &Timestamp, zone: &TimeZoneRef) -> Option<Timestamp> {
    let local = zone.wall_clock(ts);
    let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1)?;
    zone.resolve_wall_clock(&first.and_hms_opt(0, 0, 0)?)
}

/// Last second of the month containing `ts`, local zone
pub fn end_of_month(ts: &Timestamp) -> Option<Timestamp> {
    end_of_month_in(ts, &TimeZoneRef::Local)
}

/// Last second of the month containing `ts`, in `zone`
///
/// This is 23:59:59 on the last day, one second before the next month starts.
pub fn end_of_month_in(ts: &Timestamp, zone: &TimeZoneRef) -> Option<Timestamp> {
    let next_month = add_months_in(ts, 1, zone)?;
    let next_start = start_of_month_in(&next_month, zone)?;
    next_start.checked_sub_signed(Duration::seconds(1))
}

/// Add `days` calendar days (negative to go back), local zone
pub fn add_days(ts: &Timestamp, days: i64) -> Option<Timestamp> {
    add_days_in(ts, days, &TimeZoneRef::Local)
}

/// Add `days` calendar days (negative to go back), keeping the time of day in `zone`
pub fn add_days_in(ts: &Timestamp, days: i64, zone: &TimeZoneRef) -> Option<Timestamp> {
    let local = zone.wall_clock(ts);
    let shifted = if days >= 0 {
        local.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        local.checked_sub_days(Days::new(days.unsigned_abs()))
    }?;
    zone.resolve_wall_clock(&shifted)
}

/// Add `months` calendar months (negative to go back), local zone
pub fn add_months(ts: &Timestamp, months: i32) -> Option<Timestamp> {
    add_months_in(ts, months, &TimeZoneRef::Local)
}

/// Add `months` calendar months (negative to go back), in `zone`
///
/// The day is clamped to the length of the target month: Jan 31 plus one
/// month is the last day of February.
pub fn add_months_in(ts: &Timestamp, months: i32, zone: &TimeZoneRef) -> Option<Timestamp> {
    let local = zone.wall_clock(ts);
    let shifted = if months >= 0 {
        local.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        local.checked_sub_months(Months::new(months.unsigned_abs()))
    }?;
    zone.resolve_wall_clock(&shifted)
}

/// Midnight of the day before `ts`, rendered with `spec`, local zone
///
/// Returns an empty string when the date falls outside the supported range.
pub fn start_of_day(ts: &Timestamp, spec: FormatSpec) -> String {
    start_of_day_in(ts, spec, &TimeZoneRef::Local)
}

/// Midnight of the day before `ts`, rendered with `spec` in `zone`
pub fn start_of_day_in(ts: &Timestamp, spec: FormatSpec, zone: &TimeZoneRef) -> String {
    match previous_midnight(ts, zone) {
        Some(midnight) => format_in(&midnight, spec, zone),
        None => String::new(),
    }
}

fn previous_midnight(ts: &Timestamp, zone: &TimeZoneRef) -> Option<Timestamp> {
    let yesterday = add_days_in(ts, -1, zone)?;
    let date = zone.wall_clock(&yesterday).date();
    zone.resolve_wall_clock(&date.and_hms_opt(0, 0, 0)?)
}

/// Number of days in `month` (1-12) of `year`
///
/// Returns `None` for an invalid month.
pub fn days_in(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Seconds from `b` to `a` (`a - b`), negative when `a` is earlier
pub fn difference(a: &Timestamp, b: &Timestamp) -> f64 {
    let delta = a.signed_duration_since(*b);
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1_000_000_000.0
}
