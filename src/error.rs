//! Error types for the date utilities

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the date utilities
///
/// The calendar and formatting operations themselves report failure as `None`;
/// this type is used where a reason is worth carrying, such as parsing user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Time zone abbreviation or identifier could not be resolved
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Name does not match any entry of the format table
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Timestamp text could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Year/month/day combination outside the calendar
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
