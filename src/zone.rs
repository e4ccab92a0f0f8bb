//! Time zone references
//!
//! A zone can be named by a conventional abbreviation (`"EST"`), an IANA
//! identifier (`"Europe/Paris"`) or a fixed offset (`"GMT+05:30"`). Offsets are
//! always looked up at a specific instant so daylight saving is respected.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use log::debug;

use crate::error::{Error, Result};
use crate::Timestamp;

/// Abbreviations and the zone each one stands for
///
/// An abbreviation maps to a whole region rather than a fixed offset, so
/// `"EST"` in July yields the daylight saving offset of New York.
const ABBREVIATIONS: &[(&str, Tz)] = &[
    ("ADT", Tz::America__Halifax),
    ("AKDT", Tz::America__Juneau),
    ("AKST", Tz::America__Juneau),
    ("ART", Tz::America__Argentina__Buenos_Aires),
    ("AST", Tz::America__Halifax),
    ("BDT", Tz::Asia__Dhaka),
    ("BRST", Tz::America__Sao_Paulo),
    ("BRT", Tz::America__Sao_Paulo),
    ("BST", Tz::Europe__London),
    ("CAT", Tz::Africa__Harare),
    ("CDT", Tz::America__Chicago),
    ("CEST", Tz::Europe__Paris),
    ("CET", Tz::Europe__Paris),
    ("CLST", Tz::America__Santiago),
    ("CLT", Tz::America__Santiago),
    ("COT", Tz::America__Bogota),
    ("CST", Tz::America__Chicago),
    ("EAT", Tz::Africa__Addis_Ababa),
    ("EDT", Tz::America__New_York),
    ("EEST", Tz::Europe__Istanbul),
    ("EET", Tz::Europe__Istanbul),
    ("EST", Tz::America__New_York),
    ("GMT", Tz::GMT),
    ("GST", Tz::Asia__Dubai),
    ("HKT", Tz::Asia__Hong_Kong),
    ("HST", Tz::Pacific__Honolulu),
    ("ICT", Tz::Asia__Bangkok),
    ("IRST", Tz::Asia__Tehran),
    ("IST", Tz::Asia__Kolkata),
    ("JST", Tz::Asia__Tokyo),
    ("KST", Tz::Asia__Seoul),
    ("MDT", Tz::America__Denver),
    ("MSD", Tz::Europe__Moscow),
    ("MSK", Tz::Europe__Moscow),
    ("MST", Tz::America__Denver),
    ("NZDT", Tz::Pacific__Auckland),
    ("NZST", Tz::Pacific__Auckland),
    ("PDT", Tz::America__Los_Angeles),
    ("PET", Tz::America__Lima),
    ("PHT", Tz::Asia__Manila),
    ("PKT", Tz::Asia__Karachi),
    ("PST", Tz::America__Los_Angeles),
    ("SGT", Tz::Asia__Singapore),
    ("UTC", Tz::UTC),
    ("WAT", Tz::Africa__Lagos),
    ("WEST", Tz::Europe__Lisbon),
    ("WET", Tz::Europe__Lisbon),
    ("WIT", Tz::Asia__Jakarta),
];

/// Reference to the zone a timestamp should be read in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneRef {
    /// The system's current local zone
    #[default]
    Local,
    /// A zone from the IANA database
    Named(Tz),
    /// A constant offset from UTC
    Fixed(FixedOffset),
}

impl TimeZoneRef {
    /// Resolve a zone abbreviation such as `"PST"` or `"GMT+2"`
    ///
    /// Matching is case-sensitive. Returns `None` for unknown abbreviations.
    pub fn from_abbreviation(abbreviation: &str) -> Option<Self> {
        let found = ABBREVIATIONS
            .iter()
            .find(|(abbr, _)| *abbr == abbreviation)
            .map(|(_, tz)| Self::Named(*tz))
            .or_else(|| parse_gmt_offset(abbreviation).map(Self::Fixed));

        if found.is_none() {
            debug!("No zone for abbreviation {:?}", abbreviation);
        }
        found
    }

    /// Resolve an IANA identifier such as `"Europe/Paris"`
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        identifier.parse::<Tz>().ok().map(Self::Named)
    }

    /// A fixed zone `seconds` east of UTC
    pub fn fixed(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Self::Fixed)
    }

    /// Offset from UTC in effect at `ts`
    pub fn offset_at(&self, ts: &Timestamp) -> FixedOffset {
        let utc = ts.naive_utc();
        match self {
            Self::Local => Local.offset_from_utc_datetime(&utc).fix(),
            Self::Named(tz) => tz.offset_from_utc_datetime(&utc).fix(),
            Self::Fixed(offset) => *offset,
        }
    }

    /// Signed seconds east of UTC at `ts`
    pub fn seconds_from_gmt(&self, ts: &Timestamp) -> i32 {
        self.offset_at(ts).local_minus_utc()
    }

    /// `ts` carrying the offset of this zone
    pub fn localize(&self, ts: &Timestamp) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.offset_at(ts))
    }

    /// Wall-clock reading of `ts` in this zone
    pub fn wall_clock(&self, ts: &Timestamp) -> NaiveDateTime {
        self.localize(ts).naive_local()
    }

    /// Instant at which this zone's clocks read `wall_clock`
    ///
    /// Ambiguous readings (clocks turned back) resolve to the earlier instant.
    /// Readings skipped by a forward transition are read with the offset in
    /// effect before the transition, so they land as far past the transition
    /// as they were past its start.
    pub fn resolve_wall_clock(&self, wall_clock: &NaiveDateTime) -> Option<Timestamp> {
        self.lookup(wall_clock)
            .earliest()
            .or_else(|| self.resolve_skipped(wall_clock))
    }

    fn resolve_skipped(&self, wall_clock: &NaiveDateTime) -> Option<Timestamp> {
        // A day back is before the transition for any real-world offset
        let before = wall_clock.checked_sub_signed(Duration::days(1))?;
        let offset = self.offset_at(&Utc.from_utc_datetime(&before));
        let instant = wall_clock
            .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .map(|naive| Utc.from_utc_datetime(&naive));

        match instant {
            Some(ts) => debug!("Wall clock {} skipped in {}, using {}", wall_clock, self, ts),
            None => debug!("Wall clock {} does not exist in {}", wall_clock, self),
        }
        instant
    }

    fn lookup(&self, wall_clock: &NaiveDateTime) -> LocalResult<Timestamp> {
        match self {
            Self::Local => Local
                .from_local_datetime(wall_clock)
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Named(tz) => tz
                .from_local_datetime(wall_clock)
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Fixed(offset) => offset
                .from_local_datetime(wall_clock)
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for TimeZoneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "Local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::Fixed(offset) => write!(f, "GMT{}", offset),
        }
    }
}

impl FromStr for TimeZoneRef {
    type Err = Error;

    /// Accepts `"local"`, an abbreviation, a fixed `GMT`/`UTC` offset or an IANA identifier
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }

        Self::from_abbreviation(s)
            .or_else(|| Self::from_identifier(s))
            .ok_or_else(|| Error::UnknownTimeZone(s.to_string()))
    }
}

/// Parse `GMT+5`, `GMT-0800`, `UTC+05:30` and similar fixed offsets
fn parse_gmt_offset(text: &str) -> Option<FixedOffset> {
    let rest = text
        .strip_prefix("GMT")
        .or_else(|| text.strip_prefix("UTC"))?;

    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };

    let (hours, minutes) = match digits.split_once(':') {
        Some((hours, minutes)) if minutes.len() == 2 => (hours, minutes),
        Some(_) => return None,
        None if digits.len() > 2 => digits.split_at(digits.len() - 2),
        None => (digits, "00"),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if hours.len() > 2 || !all_digits(hours) || !all_digits(minutes) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 18 || minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Shift `ts` by the difference between an abbreviated zone's offset and the local offset
///
/// Both offsets are taken at `ts`. Returns `None` when the abbreviation is unknown.
pub fn convert_to_local_time(ts: &Timestamp, abbreviation: &str) -> Option<Timestamp> {
    let from = TimeZoneRef::from_abbreviation(abbreviation)?;
    convert_between(ts, &from, &TimeZoneRef::Local)
}

/// Shift `ts` so its wall-clock reading in `to` equals its reading in `from`
pub fn convert_between(ts: &Timestamp, from: &TimeZoneRef, to: &TimeZoneRef) -> Option<Timestamp> {
    let shift = i64::from(from.seconds_from_gmt(ts)) - i64::from(to.seconds_from_gmt(ts));
    ts.checked_add_signed(Duration::seconds(shift))
}
