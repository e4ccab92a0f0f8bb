//! Date Utilities Library
//!
//! Small helpers for presenting and manipulating points in time.
//! This library provides functionality to:
//! - Render timestamps with a fixed table of named display patterns
//! - Compute month boundaries and calendar-aware day/month offsets
//! - Read calendar components (hour, minute, day, weekday) in a time zone
//! - Pick a compact "comment date" rendering relative to now
//! - Resolve time zone abbreviations and shift timestamps between zones
//!
//! Operations without an explicit zone work in the system's local zone. Each of
//! them has an `_in` variant taking a [`TimeZoneRef`].
//!
//! # Example
//!
//! ```no_run
//! use date_utils::{format, start_of_month, FormatSpec};
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! println!("{}", format(&now, FormatSpec::DateAndTime));
//!
//! if let Some(first) = start_of_month(&now) {
//!     println!("{}", format(&first, FormatSpec::DateShort));
//! }
//! ```

pub mod error;
pub mod format;
pub mod zone;
pub mod calendar;
pub mod components;

/// An instant in time, stored in UTC and rendered in a zone on demand
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// Re-export commonly used items
pub use error::{Error, Result};
pub use format::{
    compile_pattern, format, format_in, format_pattern, formatter_for, formatter_for_zone,
    parse_timestamp, FormatSpec, Formatter,
};
pub use zone::{convert_between, convert_to_local_time, TimeZoneRef};
pub use calendar::{
    add_days, add_days_in, add_months, add_months_in, days_in, difference, end_of_month,
    end_of_month_in, start_of_day, start_of_day_in, start_of_month, start_of_month_in,
};
pub use components::{
    comment_date, comment_date_at, comment_spec_at, day, day_in, hour, hour_in, is_this_year,
    is_this_year_at, is_today, is_today_at, minute, minute_in, weekday, weekday_in,
};
