//! Named display formats
//!
//! Every [`FormatSpec`] stands for one fixed Unicode date pattern. The patterns
//! are compiled to chrono formatting items once per process and shared by all
//! [`Formatter`] handles; a handle only adds the zone to render in, so handles
//! are immutable and safe to use from any thread.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::format::{Fixed, Item, Numeric, Pad};
use chrono::{DateTime, Utc};
use log::{debug, trace};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::zone::TimeZoneRef;
use crate::Timestamp;

/// Named display format
///
/// Note that `Backend`, `BackendShort` and `Default` print the ISO week-based
/// year (`YYYY`), which differs from the calendar year in the first and last
/// days of some years. `Default` also prints the month where the minutes
/// would be expected (`HH:MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatSpec {
    Backend,
    BackendMid,
    BackendShort,
    Hour,
    Minute,
    Default,
    DayShort,
    TimeShort,
    Title,
    DateShort,
    TimeMidium,
    TimeLong,
    Time24,
    Time12,
    Time24Seconds,
    DateAndTime,
    MonthYear,
}

impl FormatSpec {
    /// Number of formats in the table
    pub const COUNT: usize = 17;

    /// Every format, in declaration order
    pub const ALL: [FormatSpec; FormatSpec::COUNT] = [
        FormatSpec::Backend,
        FormatSpec::BackendMid,
        FormatSpec::BackendShort,
        FormatSpec::Hour,
        FormatSpec::Minute,
        FormatSpec::Default,
        FormatSpec::DayShort,
        FormatSpec::TimeShort,
        FormatSpec::Title,
        FormatSpec::DateShort,
        FormatSpec::TimeMidium,
        FormatSpec::TimeLong,
        FormatSpec::Time24,
        FormatSpec::Time12,
        FormatSpec::Time24Seconds,
        FormatSpec::DateAndTime,
        FormatSpec::MonthYear,
    ];

    /// The Unicode date pattern this format renders with
    pub fn pattern(self) -> &'static str {
        match self {
            FormatSpec::Backend => "YYYY-MM-dd'T'HH:mm:ss'Z'",
            FormatSpec::BackendMid => "yyyy-MM-dd'T'HH:mmZZZ",
            FormatSpec::BackendShort => "YYYY-MM-dd",
            FormatSpec::Hour => "HH",
            FormatSpec::Minute => "mm",
            FormatSpec::Default => "YYYY-MM-dd HH:MM",
            FormatSpec::DayShort => "EEE",
            FormatSpec::TimeShort => "H:mm",
            FormatSpec::Title => "EEEE, H:mm",
            FormatSpec::DateShort => "dd.MM.yyyy",
            FormatSpec::TimeMidium => "EEE dd MMM H:mm",
            FormatSpec::TimeLong => "EEE dd MMM, YYYY H:mm",
            FormatSpec::Time24 => "HH:mm",
            FormatSpec::Time12 => "hh:mm a",
            FormatSpec::Time24Seconds => "HH:mm:ss",
            FormatSpec::DateAndTime => "dd.MM.yyyy HH:mm:ss",
            FormatSpec::MonthYear => "MM/yyyy",
        }
    }

    /// Table name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            FormatSpec::Backend => "backend",
            FormatSpec::BackendMid => "backendMid",
            FormatSpec::BackendShort => "backendShort",
            FormatSpec::Hour => "hour",
            FormatSpec::Minute => "minute",
            FormatSpec::Default => "default",
            FormatSpec::DayShort => "dayShort",
            FormatSpec::TimeShort => "timeShort",
            FormatSpec::Title => "title",
            FormatSpec::DateShort => "dateShort",
            FormatSpec::TimeMidium => "timeMidium",
            FormatSpec::TimeLong => "timeLong",
            FormatSpec::Time24 => "time24",
            FormatSpec::Time12 => "time12",
            FormatSpec::Time24Seconds => "time24Seconds",
            FormatSpec::DateAndTime => "dateAndTime",
            FormatSpec::MonthYear => "monthYear",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        FormatSpec::ALL
            .iter()
            .copied()
            .find(|spec| spec.name() == s)
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

type CompiledPattern = Arc<[Item<'static>]>;

/// Compiled items for every format, indexed by declaration order
static PATTERNS: Lazy<[CompiledPattern; FormatSpec::COUNT]> = Lazy::new(|| {
    debug!("Compiling {} display patterns", FormatSpec::COUNT);
    FormatSpec::ALL.map(|spec| CompiledPattern::from(compile_pattern(spec.pattern())))
});

/// A format bound to the zone it renders in
#[derive(Debug, Clone)]
pub struct Formatter {
    spec: FormatSpec,
    zone: TimeZoneRef,
    items: CompiledPattern,
}

impl Formatter {
    /// The format this handle renders
    pub fn spec(&self) -> FormatSpec {
        self.spec
    }

    /// The pattern string this handle renders with
    pub fn pattern(&self) -> &'static str {
        self.spec.pattern()
    }

    /// The zone timestamps are shown in
    pub fn zone(&self) -> &TimeZoneRef {
        &self.zone
    }

    /// Render `ts`
    pub fn format(&self, ts: &Timestamp) -> String {
        render(&self.items, ts, &self.zone)
    }
}

/// Formatter for `spec` in the local zone
pub fn formatter_for(spec: FormatSpec) -> Formatter {
    formatter_for_zone(spec, &TimeZoneRef::Local)
}

/// Formatter for `spec` in `zone`
pub fn formatter_for_zone(spec: FormatSpec, zone: &TimeZoneRef) -> Formatter {
    trace!("Formatter for {} in {}", spec, zone);
    Formatter {
        spec,
        zone: *zone,
        items: Arc::clone(&PATTERNS[spec.index()]),
    }
}

/// Render `ts` with `spec` in the local zone
pub fn format(ts: &Timestamp, spec: FormatSpec) -> String {
    format_in(ts, spec, &TimeZoneRef::Local)
}

/// Render `ts` with `spec` in `zone`
pub fn format_in(ts: &Timestamp, spec: FormatSpec, zone: &TimeZoneRef) -> String {
    formatter_for_zone(spec, zone).format(ts)
}

/// Render `ts` with an arbitrary Unicode date pattern in `zone`
///
/// The pattern is compiled on every call; prefer [`format_in`] for the named formats.
pub fn format_pattern(ts: &Timestamp, pattern: &str, zone: &TimeZoneRef) -> String {
    render(&compile_pattern(pattern), ts, zone)
}

fn render(items: &[Item<'static>], ts: &Timestamp, zone: &TimeZoneRef) -> String {
    zone.localize(ts).format_with_items(items.iter()).to_string()
}

/// Compile a Unicode date pattern into chrono formatting items
///
/// Supported letters:
/// - `y` year (`yy` two digits), `Y` ISO week-based year (`YY` two digits)
/// - `M` month (`M`/`MM` numeric, `MMM` short name, `MMMM` full name)
/// - `d` day, `H` hour 0-23, `h` hour 1-12, `m` minute, `s` second
///   (one letter unpadded, two zero padded)
/// - `E` weekday (`E` to `EEE` short name, `EEEE` full name)
/// - `a` AM/PM marker
/// - `Z` offset (`Z` to `ZZZ` as `+0100`, `ZZZZ` as `GMT+01:00`, `ZZZZZ` as `+01:00` or `Z`)
///
/// Text between single quotes is literal and `''` is a single quote. Any other
/// character, including letters not listed above, is copied through unchanged.
pub fn compile_pattern(pattern: &str) -> Vec<Item<'static>> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                literal.push('\'');
                continue;
            }
            // Quoted run; an unterminated quote runs to the end
            while let Some(q) = chars.next() {
                if q != '\'' {
                    literal.push(q);
                } else if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                } else {
                    break;
                }
            }
            continue;
        }

        if !c.is_ascii_alphabetic() {
            literal.push(c);
            continue;
        }

        let mut width = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            width += 1;
        }

        match field(c, width) {
            Some(field_items) => {
                flush_literal(&mut literal, &mut items);
                items.extend(field_items);
            }
            None => literal.extend(std::iter::repeat(c).take(width)),
        }
    }

    flush_literal(&mut literal, &mut items);
    items
}

fn flush_literal(literal: &mut String, items: &mut Vec<Item<'static>>) {
    if !literal.is_empty() {
        items.push(Item::OwnedLiteral(std::mem::take(literal).into_boxed_str()));
    }
}

fn field(letter: char, width: usize) -> Option<Vec<Item<'static>>> {
    let padded = |numeric: Numeric| {
        let pad = if width == 1 { Pad::None } else { Pad::Zero };
        vec![Item::Numeric(numeric, pad)]
    };

    let items = match letter {
        'y' if width == 2 => vec![Item::Numeric(Numeric::YearMod100, Pad::Zero)],
        'y' => padded(Numeric::Year),
        'Y' if width == 2 => vec![Item::Numeric(Numeric::IsoYearMod100, Pad::Zero)],
        'Y' => padded(Numeric::IsoYear),
        'M' if width >= 4 => vec![Item::Fixed(Fixed::LongMonthName)],
        'M' if width == 3 => vec![Item::Fixed(Fixed::ShortMonthName)],
        'M' => padded(Numeric::Month),
        'd' => padded(Numeric::Day),
        'H' => padded(Numeric::Hour),
        'h' => padded(Numeric::Hour12),
        'm' => padded(Numeric::Minute),
        's' => padded(Numeric::Second),
        'E' if width >= 4 => vec![Item::Fixed(Fixed::LongWeekdayName)],
        'E' => vec![Item::Fixed(Fixed::ShortWeekdayName)],
        'a' => vec![Item::Fixed(Fixed::UpperAmPm)],
        'Z' if width <= 3 => vec![Item::Fixed(Fixed::TimezoneOffset)],
        'Z' if width == 4 => vec![
            Item::Literal("GMT"),
            Item::Fixed(Fixed::TimezoneOffsetColon),
        ],
        'Z' => vec![Item::Fixed(Fixed::TimezoneOffsetColonZ)],
        _ => return None,
    };

    Some(items)
}

/// Parse an RFC 3339 timestamp such as `2024-03-10T12:00:00-05:00`
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("{}: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn utc(s: &str) -> Timestamp {
        parse_timestamp(s).unwrap()
    }

    fn in_utc(ts: &Timestamp, spec: FormatSpec) -> String {
        format_in(ts, spec, &TimeZoneRef::Named(Tz::UTC))
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, spec) in FormatSpec::ALL.iter().enumerate() {
            assert_eq!(spec.index(), i, "{} is out of order", spec);
        }
    }

    #[test]
    fn test_table_rendering() {
        let ts = utc("2024-03-05T14:07:09Z");
        let expected = vec![
            (FormatSpec::Backend, "2024-03-05T14:07:09Z"),
            (FormatSpec::BackendMid, "2024-03-05T14:07+0000"),
            (FormatSpec::BackendShort, "2024-03-05"),
            (FormatSpec::Hour, "14"),
            (FormatSpec::Minute, "07"),
            (FormatSpec::Default, "2024-03-05 14:03"),
            (FormatSpec::DayShort, "Tue"),
            (FormatSpec::TimeShort, "14:07"),
            (FormatSpec::Title, "Tuesday, 14:07"),
            (FormatSpec::DateShort, "05.03.2024"),
            (FormatSpec::TimeMidium, "Tue 05 Mar 14:07"),
            (FormatSpec::TimeLong, "Tue 05 Mar, 2024 14:07"),
            (FormatSpec::Time24, "14:07"),
            (FormatSpec::Time12, "02:07 PM"),
            (FormatSpec::Time24Seconds, "14:07:09"),
            (FormatSpec::DateAndTime, "05.03.2024 14:07:09"),
            (FormatSpec::MonthYear, "03/2024"),
        ];

        assert_eq!(expected.len(), FormatSpec::ALL.len());
        for (spec, output) in expected {
            assert_eq!(in_utc(&ts, spec), output, "rendering {}", spec);
        }
    }

    #[test]
    fn test_unpadded_hour() {
        let ts = utc("2024-03-05T04:07:09Z");
        assert_eq!(in_utc(&ts, FormatSpec::TimeShort), "4:07");
        assert_eq!(in_utc(&ts, FormatSpec::Time24), "04:07");
        assert_eq!(in_utc(&ts, FormatSpec::Time12), "04:07 AM");
    }

    #[test]
    fn test_week_based_year() {
        // 2024-12-30 belongs to ISO week 1 of 2025
        let ts = utc("2024-12-30T10:00:00Z");
        assert_eq!(in_utc(&ts, FormatSpec::BackendShort), "2025-12-30");
        assert_eq!(in_utc(&ts, FormatSpec::DateShort), "30.12.2024");
        assert_eq!(in_utc(&ts, FormatSpec::MonthYear), "12/2024");
    }

    #[test]
    fn test_zone_applied_per_formatter() {
        let ts = utc("2024-07-01T12:30:00Z");
        let tokyo = TimeZoneRef::Named(Tz::Asia__Tokyo);
        let new_york = TimeZoneRef::Named(Tz::America__New_York);

        let in_tokyo = formatter_for_zone(FormatSpec::BackendMid, &tokyo);
        let in_new_york = formatter_for_zone(FormatSpec::BackendMid, &new_york);

        assert_eq!(in_tokyo.format(&ts), "2024-07-01T21:30+0900");
        assert_eq!(in_new_york.format(&ts), "2024-07-01T08:30-0400");
        // The first handle is unaffected by the second
        assert_eq!(in_tokyo.format(&ts), "2024-07-01T21:30+0900");
        assert_eq!(in_tokyo.zone(), &tokyo);
        assert_eq!(in_tokyo.spec(), FormatSpec::BackendMid);
        assert_eq!(in_tokyo.pattern(), "yyyy-MM-dd'T'HH:mmZZZ");
    }

    #[test]
    fn test_formatter_for_defaults_to_local() {
        let formatter = formatter_for(FormatSpec::Time24);
        assert_eq!(formatter.zone(), &TimeZoneRef::Local);
    }

    #[test]
    fn test_spec_names_round_trip() {
        for spec in FormatSpec::ALL {
            assert_eq!(spec.name().parse::<FormatSpec>().unwrap(), spec);
        }
        assert_eq!(
            "timeMedium".parse::<FormatSpec>(),
            Err(Error::UnknownFormat("timeMedium".to_string()))
        );
    }

    #[test]
    fn test_quoted_literals() {
        let ts = utc("2024-03-05T14:07:09Z");
        let zone = TimeZoneRef::Named(Tz::UTC);
        assert_eq!(format_pattern(&ts, "'at' HH'h'", &zone), "at 14h");
        assert_eq!(format_pattern(&ts, "HH''mm", &zone), "14'07");
        assert_eq!(format_pattern(&ts, "'it''s' H", &zone), "it's 14");
        assert_eq!(format_pattern(&ts, "H 'open", &zone), "14 open");
    }

    #[test]
    fn test_other_fields() {
        let ts = utc("2024-03-05T14:07:09Z");
        let zone = TimeZoneRef::fixed(-(3 * 3600 + 30 * 60)).unwrap();
        assert_eq!(format_pattern(&ts, "d/M/yy", &zone), "5/3/24");
        assert_eq!(format_pattern(&ts, "MMMM", &zone), "March");
        assert_eq!(format_pattern(&ts, "h:m:s", &zone), "10:37:9");
        assert_eq!(format_pattern(&ts, "ZZZZ", &zone), "GMT-03:30");
        assert_eq!(format_pattern(&ts, "ZZZZZ", &zone), "-03:30");
        assert_eq!(
            format_pattern(&ts, "ZZZZZ", &TimeZoneRef::Named(Tz::UTC)),
            "Z"
        );
    }

    #[test]
    fn test_unsupported_letters_are_literal() {
        let ts = utc("2024-03-05T14:07:09Z");
        let zone = TimeZoneRef::Named(Tz::UTC);
        assert_eq!(format_pattern(&ts, "HH qq", &zone), "14 qq");
        assert_eq!(format_pattern(&ts, "100% HH", &zone), "100% 14");
    }

    #[test]
    fn test_compile_merges_literals() {
        let items = compile_pattern("'T'-");
        assert_eq!(items, vec![Item::OwnedLiteral("T-".into())]);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2024-03-10T12:00:00-05:00").unwrap();
        assert_eq!(ts, utc("2024-03-10T17:00:00Z"));
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(Error::InvalidTimestamp(_))
        ));
    }
}
