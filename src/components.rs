//! Calendar components and relative predicates

use chrono::{Datelike, Timelike, Utc};

use crate::format::{format_in, FormatSpec};
use crate::zone::TimeZoneRef;
use crate::Timestamp;

/// Minute of the hour (0-59), local zone
pub fn minute(ts: &Timestamp) -> u32 {
    minute_in(ts, &TimeZoneRef::Local)
}

/// Minute of the hour (0-59) in `zone`
pub fn minute_in(ts: &Timestamp, zone: &TimeZoneRef) -> u32 {
    zone.wall_clock(ts).minute()
}

/// Hour of the day (0-23), local zone
pub fn hour(ts: &Timestamp) -> u32 {
    hour_in(ts, &TimeZoneRef::Local)
}

/// Hour of the day (0-23) in `zone`
pub fn hour_in(ts: &Timestamp, zone: &TimeZoneRef) -> u32 {
    zone.wall_clock(ts).hour()
}

/// Day of the month (1-31), local zone
pub fn day(ts: &Timestamp) -> u32 {
    day_in(ts, &TimeZoneRef::Local)
}

/// Day of the month (1-31) in `zone`
pub fn day_in(ts: &Timestamp, zone: &TimeZoneRef) -> u32 {
    zone.wall_clock(ts).day()
}

/// Day of the week, local zone, numbered 1 = Sunday through 7 = Saturday
pub fn weekday(ts: &Timestamp) -> u32 {
    weekday_in(ts, &TimeZoneRef::Local)
}

/// Day of the week in `zone`, 1 = Sunday
pub fn weekday_in(ts: &Timestamp, zone: &TimeZoneRef) -> u32 {
    zone.wall_clock(ts).weekday().number_from_sunday()
}

/// Whether `ts` falls on today's day of the month
///
/// Only the day of the month is compared: the 15th of any month or year
/// counts as "today" when today is the 15th.
pub fn is_today(ts: &Timestamp) -> bool {
    is_today_at(ts, &Utc::now(), &TimeZoneRef::Local)
}

/// [`is_today`] against an explicit `now`
pub fn is_today_at(ts: &Timestamp, now: &Timestamp, zone: &TimeZoneRef) -> bool {
    day_in(ts, zone) == day_in(now, zone)
}

/// Whether `ts` falls in the current calendar year, local zone
pub fn is_this_year(ts: &Timestamp) -> bool {
    is_this_year_at(ts, &Utc::now(), &TimeZoneRef::Local)
}

/// [`is_this_year`] against an explicit `now`
pub fn is_this_year_at(ts: &Timestamp, now: &Timestamp, zone: &TimeZoneRef) -> bool {
    zone.wall_clock(ts).year() == zone.wall_clock(now).year()
}

/// Compact rendering for a comment timestamp, local zone
///
/// Other years get [`FormatSpec::TimeLong`], today gets [`FormatSpec::TimeShort`]
/// and anything else [`FormatSpec::TimeMidium`].
pub fn comment_date(ts: &Timestamp) -> String {
    comment_date_at(ts, &Utc::now(), &TimeZoneRef::Local)
}

/// [`comment_date`] against an explicit `now`, rendered in `zone`
pub fn comment_date_at(ts: &Timestamp, now: &Timestamp, zone: &TimeZoneRef) -> String {
    format_in(ts, comment_spec_at(ts, now, zone), zone)
}

/// The format [`comment_date_at`] picks for `ts`
pub fn comment_spec_at(ts: &Timestamp, now: &Timestamp, zone: &TimeZoneRef) -> FormatSpec {
    if !is_this_year_at(ts, now, zone) {
        FormatSpec::TimeLong
    } else if is_today_at(ts, now, zone) {
        FormatSpec::TimeShort
    } else {
        FormatSpec::TimeMidium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_timestamp;
    use chrono_tz::Tz;

    fn utc(s: &str) -> Timestamp {
        parse_timestamp(s).unwrap()
    }

    fn utc_zone() -> TimeZoneRef {
        TimeZoneRef::Named(Tz::UTC)
    }

    #[test]
    fn test_components() {
        let zone = TimeZoneRef::Named(Tz::Asia__Kolkata);
        // 2024-03-09 23:50 in Kolkata, a Saturday
        let ts = utc("2024-03-09T18:20:00Z");

        assert_eq!(hour_in(&ts, &zone), 23);
        assert_eq!(minute_in(&ts, &zone), 50);
        assert_eq!(day_in(&ts, &zone), 9);
        assert_eq!(weekday_in(&ts, &zone), 7);
    }

    #[test]
    fn test_weekday_starts_on_sunday() {
        let zone = utc_zone();
        assert_eq!(weekday_in(&utc("2024-03-10T12:00:00Z"), &zone), 1);
        assert_eq!(weekday_in(&utc("2024-03-11T12:00:00Z"), &zone), 2);
        assert_eq!(weekday_in(&utc("2024-03-16T12:00:00Z"), &zone), 7);
    }

    #[test]
    fn test_is_today_compares_day_of_month_only() {
        let zone = utc_zone();
        let now = utc("2024-05-15T09:00:00Z");

        assert!(is_today_at(&utc("2024-05-15T23:00:00Z"), &now, &zone));
        assert!(is_today_at(&utc("2024-02-15T08:00:00Z"), &now, &zone));
        assert!(is_today_at(&utc("1999-12-15T08:00:00Z"), &now, &zone));
        assert!(!is_today_at(&utc("2024-05-14T09:00:00Z"), &now, &zone));
    }

    #[test]
    fn test_is_this_year() {
        let zone = utc_zone();
        let now = utc("2024-05-15T09:00:00Z");

        assert!(is_this_year_at(&utc("2024-01-01T00:00:00Z"), &now, &zone));
        assert!(is_this_year_at(&utc("2024-12-31T23:59:59Z"), &now, &zone));
        assert!(!is_this_year_at(&utc("2023-12-31T23:59:59Z"), &now, &zone));
        assert!(!is_this_year_at(&utc("2025-01-01T00:00:00Z"), &now, &zone));
    }

    #[test]
    fn test_is_this_year_uses_zone() {
        let now = utc("2024-05-15T09:00:00Z");
        // Still 2023 in UTC, already 2024 in Tokyo
        let ts = utc("2023-12-31T20:00:00Z");

        assert!(!is_this_year_at(&ts, &now, &utc_zone()));
        assert!(is_this_year_at(&ts, &now, &TimeZoneRef::Named(Tz::Asia__Tokyo)));
    }

    #[test]
    fn test_comment_spec_precedence() {
        let zone = utc_zone();
        let now = utc("2024-05-15T09:00:00Z");

        // Other year wins even on the same day of month
        assert_eq!(
            comment_spec_at(&utc("2023-05-15T08:00:00Z"), &now, &zone),
            FormatSpec::TimeLong
        );
        assert_eq!(
            comment_spec_at(&utc("2024-05-15T07:30:00Z"), &now, &zone),
            FormatSpec::TimeShort
        );
        assert_eq!(
            comment_spec_at(&utc("2024-04-02T07:30:00Z"), &now, &zone),
            FormatSpec::TimeMidium
        );
        // Same day of month in another month of this year
        assert_eq!(
            comment_spec_at(&utc("2024-01-15T07:30:00Z"), &now, &zone),
            FormatSpec::TimeShort
        );
    }

    #[test]
    fn test_comment_date_rendering() {
        let zone = utc_zone();
        let now = utc("2024-05-15T09:00:00Z");

        assert_eq!(
            comment_date_at(&utc("2023-05-20T08:05:00Z"), &now, &zone),
            "Sat 20 May, 2023 8:05"
        );
        assert_eq!(comment_date_at(&utc("2024-05-15T07:30:00Z"), &now, &zone), "7:30");
        assert_eq!(
            comment_date_at(&utc("2024-04-02T17:30:00Z"), &now, &zone),
            "Tue 02 Apr 17:30"
        );
    }
}
