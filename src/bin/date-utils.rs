//! Date Utilities CLI tool
//!
//! A command-line front end for the named formats and calendar helpers.

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, LevelFilter};
use std::process;

use date_utils::{
    add_days_in, add_months_in, comment_date_at, convert_between, day_in, days_in, difference,
    end_of_month_in, format_in, format_pattern, hour_in, is_this_year_at, is_today_at,
    minute_in, parse_timestamp, start_of_day_in, start_of_month_in, weekday_in, FormatSpec,
    TimeZoneRef, Timestamp,
};

/// Date Utilities - Render timestamps with named formats and do calendar arithmetic
#[derive(Parser)]
#[command(name = "date-utils")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Render now with a named format
    date-utils format dateAndTime

    # Render a timestamp in Tokyo
    date-utils --zone Asia/Tokyo format timeLong 2024-03-05T14:07:09Z

    # First and last second of the current month
    date-utils month

    # Shift a New York wall-clock reading into the local zone
    date-utils convert EST 2024-07-01T12:00:00Z")]
struct Cli {
    /// Zone to work in: local, an abbreviation (EST), an IANA id (Europe/Paris) or GMT+HH:MM
    #[arg(long, global = true, default_value = "local")]
    zone: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a timestamp with a named format
    Format {
        /// Format name (see `specs`)
        spec: String,

        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// Render a timestamp with an arbitrary date pattern
    Pattern {
        /// Pattern such as "EEE dd MMM 'at' HH:mm"
        pattern: String,

        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// List every named format with its pattern
    Specs,

    /// Show the first and last second of the month
    Month {
        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// Add days and/or months
    Add {
        /// Days to add (negative to go back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        days: i64,

        /// Months to add (negative to go back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        months: i32,

        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// Render midnight of the previous day with a named format
    StartOfDay {
        /// Format name (see `specs`)
        spec: String,

        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// Number of days in a month
    DaysIn {
        year: i32,

        /// Month number, 1-12
        month: u32,
    },

    /// Show calendar components and the comment date
    Info {
        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// Shift a timestamp from an abbreviated zone's clock to the working zone's clock
    Convert {
        /// Zone abbreviation, e.g. EST or GMT+2
        abbreviation: String,

        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },

    /// Seconds between two timestamps (A - B)
    Diff {
        a: String,
        b: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Send log records to stderr at the requested verbosity
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let zone: TimeZoneRef = cli.zone.parse()?;
    debug!("Working zone: {}", zone);

    match cli.command {
        Commands::Format { spec, timestamp } => cmd_format(&zone, &spec, timestamp),
        Commands::Pattern { pattern, timestamp } => cmd_pattern(&zone, &pattern, timestamp),
        Commands::Specs => cmd_specs(&zone),
        Commands::Month { timestamp } => cmd_month(&zone, timestamp),
        Commands::Add { days, months, timestamp } => cmd_add(&zone, days, months, timestamp),
        Commands::StartOfDay { spec, timestamp } => cmd_start_of_day(&zone, &spec, timestamp),
        Commands::DaysIn { year, month } => cmd_days_in(year, month),
        Commands::Info { timestamp } => cmd_info(&zone, timestamp),
        Commands::Convert { abbreviation, timestamp } => {
            cmd_convert(&zone, &abbreviation, timestamp)
        }
        Commands::Diff { a, b } => cmd_diff(&a, &b),
    }
}

/// Parse the optional timestamp argument, falling back to now
fn timestamp_or_now(timestamp: Option<String>) -> anyhow::Result<Timestamp> {
    match timestamp {
        Some(text) => Ok(parse_timestamp(&text)?),
        None => Ok(Utc::now()),
    }
}

fn cmd_format(zone: &TimeZoneRef, spec: &str, timestamp: Option<String>) -> anyhow::Result<()> {
    let spec: FormatSpec = spec.parse()?;
    let ts = timestamp_or_now(timestamp)?;
    println!("{}", format_in(&ts, spec, zone));
    Ok(())
}

fn cmd_pattern(zone: &TimeZoneRef, pattern: &str, timestamp: Option<String>) -> anyhow::Result<()> {
    let ts = timestamp_or_now(timestamp)?;
    println!("{}", format_pattern(&ts, pattern, zone));
    Ok(())
}

fn cmd_specs(zone: &TimeZoneRef) -> anyhow::Result<()> {
    let now = Utc::now();
    for spec in FormatSpec::ALL {
        println!(
            "{:<14} {:<26} {}",
            spec.name(),
            spec.pattern(),
            format_in(&now, spec, zone)
        );
    }
    Ok(())
}

fn cmd_month(zone: &TimeZoneRef, timestamp: Option<String>) -> anyhow::Result<()> {
    let ts = timestamp_or_now(timestamp)?;
    let start = start_of_month_in(&ts, zone).context("Start of month is out of range")?;
    let end = end_of_month_in(&ts, zone).context("End of month is out of range")?;

    println!("Start: {}", format_in(&start, FormatSpec::DateAndTime, zone));
    println!("End:   {}", format_in(&end, FormatSpec::DateAndTime, zone));
    Ok(())
}

fn cmd_add(
    zone: &TimeZoneRef,
    days: i64,
    months: i32,
    timestamp: Option<String>,
) -> anyhow::Result<()> {
    let ts = timestamp_or_now(timestamp)?;
    let shifted = add_months_in(&ts, months, zone)
        .and_then(|ts| add_days_in(&ts, days, zone))
        .ok_or_else(|| anyhow!("Result is out of range"))?;

    println!("{}", shifted.to_rfc3339());
    Ok(())
}

fn cmd_start_of_day(
    zone: &TimeZoneRef,
    spec: &str,
    timestamp: Option<String>,
) -> anyhow::Result<()> {
    let spec: FormatSpec = spec.parse()?;
    let ts = timestamp_or_now(timestamp)?;
    println!("{}", start_of_day_in(&ts, spec, zone));
    Ok(())
}

fn cmd_days_in(year: i32, month: u32) -> anyhow::Result<()> {
    let days = days_in(year, month)
        .ok_or_else(|| date_utils::Error::InvalidDate(format!("{}-{:02}", year, month)))?;
    println!("{}", days);
    Ok(())
}

fn cmd_info(zone: &TimeZoneRef, timestamp: Option<String>) -> anyhow::Result<()> {
    let ts = timestamp_or_now(timestamp)?;
    let now = Utc::now();

    println!("Timestamp:  {}", ts.to_rfc3339());
    println!("Zone:       {} ({:+} s)", zone, zone.seconds_from_gmt(&ts));
    println!("Hour:       {}", hour_in(&ts, zone));
    println!("Minute:     {}", minute_in(&ts, zone));
    println!("Day:        {}", day_in(&ts, zone));
    println!("Weekday:    {} (1 = Sunday)", weekday_in(&ts, zone));
    println!("Today:      {}", is_today_at(&ts, &now, zone));
    println!("This year:  {}", is_this_year_at(&ts, &now, zone));
    println!("Comment:    {}", comment_date_at(&ts, &now, zone));
    Ok(())
}

fn cmd_convert(
    zone: &TimeZoneRef,
    abbreviation: &str,
    timestamp: Option<String>,
) -> anyhow::Result<()> {
    let ts = timestamp_or_now(timestamp)?;
    let from = TimeZoneRef::from_abbreviation(abbreviation)
        .ok_or_else(|| date_utils::Error::UnknownTimeZone(abbreviation.to_string()))?;
    let converted = convert_between(&ts, &from, zone).context("Result is out of range")?;

    println!("{}", converted.to_rfc3339());
    Ok(())
}

fn cmd_diff(a: &str, b: &str) -> anyhow::Result<()> {
    let a = parse_timestamp(a)?;
    let b = parse_timestamp(b)?;
    println!("{}", difference(&a, &b));
    Ok(())
}
